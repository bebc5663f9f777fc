mod auth;

pub use auth::{auth_middleware, create_jwt, Auth};
