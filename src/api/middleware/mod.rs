mod auth;

pub use auth::{AuthMiddleware, AuthedUser};
