//! Integration test utilities for the TRPG session manager
//!
//! Spawns the real Axum application over in-memory repositories and drives
//! it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
