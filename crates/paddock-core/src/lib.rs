//! Paddock core: configuration layer, filesystem stats, data-cache management.

pub mod config;
pub mod data_cache;
pub mod fs_stats;
