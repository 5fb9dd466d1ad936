use std::collections::HashMap;

use super::types::{Post, Profile, ProfileWithUser, User, UserWithRelations};

/// Checks a username before it is stored.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > 32 {
        return Err("Username too long (max 32 characters)".to_string());
    }
    Ok(())
}

fn group_posts(posts: Vec<Post>) -> HashMap<i64, Vec<Post>> {
    let mut by_user: HashMap<i64, Vec<Post>> = HashMap::new();
    for post in posts {
        by_user.entry(post.user_id).or_default().push(post);
    }
    for posts in by_user.values_mut() {
        posts.sort_by_key(|post| post.id);
    }
    by_user
}

/// Builds each user's graph from three flat result sets.
///
/// Users come back sorted by ID, posts sorted by ID.
pub fn assemble_user_graphs(
    mut users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
) -> Vec<UserWithRelations> {
    users.sort_by_key(|user| user.id);
    let mut profiles: HashMap<i64, Profile> =
        profiles.into_iter().map(|p| (p.user_id, p)).collect();
    let mut posts = group_posts(posts);

    users
        .into_iter()
        .map(|user| UserWithRelations {
            profile: profiles.remove(&user.id),
            posts: posts.remove(&user.id).unwrap_or_default(),
            user,
        })
        .collect()
}

/// Joins profiles to their users and the users' posts.
///
/// Profiles whose user is missing from `users` are dropped.
pub fn assemble_profile_graphs(
    mut profiles: Vec<Profile>,
    users: Vec<User>,
    posts: Vec<Post>,
) -> Vec<ProfileWithUser> {
    profiles.sort_by_key(|profile| profile.id);
    let users: HashMap<i64, User> = users.into_iter().map(|u| (u.id, u)).collect();
    let mut posts = group_posts(posts);

    profiles
        .into_iter()
        .filter_map(|profile| {
            let user = users.get(&profile.user_id)?.clone();
            Some(ProfileWithUser {
                posts: posts.remove(&profile.user_id).unwrap_or_default(),
                profile,
                user,
            })
        })
        .collect()
}
