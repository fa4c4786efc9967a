pub mod admin_handlers;
pub mod auth_handlers;
pub mod chirp_handlers;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod webhook_handlers;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
