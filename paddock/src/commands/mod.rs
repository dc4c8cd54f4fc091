//! CLI command implementations.

pub mod cache;
pub mod clean;
pub mod doctor;
pub mod setup;
pub mod start;
