//! Guest bookings: creation, payment, cancellation, and listing.

pub mod controller;
pub mod error;
pub mod payload;
pub mod router;
pub mod service;

pub use error::BookingError;
pub use service::BookingService;
