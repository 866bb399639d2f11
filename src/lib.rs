pub mod auth;
pub mod error;
pub mod languages;
pub mod model;
pub mod remote;
pub mod repository;
pub mod rights;
pub mod store;
pub mod users;
pub mod validators;

pub use self::error::{ApiError, ApiResult};
