//! Read-only room catalogue.

pub mod controller;
pub mod router;
pub mod service;
