//! # Staybook Auth
//!
//! Access token claims and JWT utilities for the Staybook API.
//!
//! Tokens are issued by the login endpoint and carry the account id and
//! e-mail. Booking operations read both from the verified claims, so no
//! database lookup is needed to identify the caller.
//!
//! ```ignore
//! use staybook_auth::{create_access_token, verify_token};
//! use staybook_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "guest@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
