//! Database seeding for local development.
//!
//! - [`rooms`]: bulk room generation and cleanup
//! - [`users`]: single account creation

pub mod rooms;
pub mod users;

pub use rooms::{clear_rooms, create_room, generate_rooms, seed_rooms};
pub use users::create_user;

/// Seed data for creating a room.
pub struct RoomSeed {
    pub name: String,
    pub price_per_night: i64,
}
