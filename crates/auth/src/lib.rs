pub mod error;
pub mod service;

pub use error::{AuthError, Result};
pub use service::{AuthService, SESSION_TTL_HOURS};
