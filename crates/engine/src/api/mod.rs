//! API layer - HTTP entry points.

pub mod auth;
pub mod error;
pub mod http;

pub use auth::{Auth, Viewer, USER_ID_HEADER};
pub use error::ApiError;
