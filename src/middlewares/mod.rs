pub mod auth;
pub mod cors;

pub use auth::{AuthMiddleware, AuthenticatedUser, bearer_token};
pub use cors::create_cors;
