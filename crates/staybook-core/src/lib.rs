//! # Staybook Core
//!
//! Core types, errors, and utilities for the Staybook API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use staybook_core::errors::AppError;
//! use staybook_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Room not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorResponse, FieldErrors};
pub use password::{hash_password, verify_password};
