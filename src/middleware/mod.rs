//! Request extractors for cross-cutting concerns.
//!
//! - [`auth`]: bearer token authentication
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. The handler turns the claims into a [`Caller`](staybook_models::Caller)
//!    and passes it explicitly to the service layer
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn list_my_bookings(auth_user: AuthUser) -> Result<impl IntoResponse, AppError> {
//!     let caller = auth_user.caller()?;
//!     // ...
//! }
//! ```

pub mod auth;
