use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A user's profile. Each user has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Field values for a profile that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewProfile {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

impl Profile {
    pub fn from_new(id: i64, new: NewProfile) -> Self {
        Self {
            id,
            user_id: new.user_id,
            first_name: new.first_name,
            last_name: new.last_name,
        }
    }
}

/// A post written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
}

/// A user with their optional profile and their posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithRelations {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
    pub posts: Vec<Post>,
}

/// A post with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub user: User,
}

/// A profile with its user and that user's posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileWithUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: User,
    pub posts: Vec<Post>,
}
