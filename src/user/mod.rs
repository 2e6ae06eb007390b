pub mod user_models;
pub mod user_handlers;

pub use user_models::{Role, DEFAULT_ROLE, StaticUser, StaticUsers, StaticUsersResponse};
