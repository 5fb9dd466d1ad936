mod operations;
mod types;

pub use operations::{assemble_profile_graphs, assemble_user_graphs, validate_username};
pub use types::{
    NewProfile, Post, PostWithAuthor, Profile, ProfileWithUser, User, UserWithRelations,
};
