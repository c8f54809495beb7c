//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod pos;
pub mod state;
pub mod users;

pub use error::ApiResult;
pub use state::AppState;
