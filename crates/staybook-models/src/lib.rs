//! # Staybook Models
//!
//! Domain models and DTOs for the Staybook API.
//!
//! - [`auth`]: Login and registration payloads
//! - [`bookings`]: Bookings, their status machine, and stay date ranges
//! - [`ids`]: Strongly-typed entity ids
//! - [`rooms`]: Bookable rooms
//! - [`users`]: Accounts and the authenticated [`Caller`](users::Caller)

pub mod auth;
pub mod bookings;
pub mod ids;
pub mod rooms;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, RegisterRequestDto};
pub use bookings::{
    Booking, BookingStatus, BookingWithRoom, CreateBookingDto, DateRange, InvalidDateRange,
    InvalidTransition, total_price,
};
pub use ids::{BookingId, RoomId, UserId};
pub use rooms::{Room, RoomSummary};
pub use users::{Caller, User};
