//! # Staybook CLI
//!
//! Room and account seeding utilities for Staybook development.
//!
//! ```ignore
//! use staybook_cli::seeder::seed_rooms;
//!
//! seed_rooms(&pool, 25).await?;
//! ```

pub mod seeder;
