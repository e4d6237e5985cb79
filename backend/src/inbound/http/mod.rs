//! HTTP inbound adapter exposing the record API.

pub mod data;
pub mod error;
pub mod guard;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
