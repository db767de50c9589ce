//! Account registration and token login.

pub mod controller;
pub mod router;
pub mod service;
