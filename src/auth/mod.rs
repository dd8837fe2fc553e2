//! Credentials, session tokens and the middleware that checks them.

mod middleware;
mod password;
mod service;
mod token;

pub use middleware::{bearer_token, require_token};
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Credentials};
pub use token::{Claims, TokenIssuer, TOKEN_LIFETIME_SECS};
