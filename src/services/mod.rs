pub mod api_client;
pub mod auth_service;
pub mod error;
pub mod role_guard;
pub mod session_service;

pub use api_client::ApiClient;
pub use error::ApiError;
pub use role_guard::{guard, path_by_role, require_role, GuardOutcome};
pub use session_service::{SessionBackend, SessionService};
