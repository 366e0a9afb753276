//! Shared library surface for the air-quality server and its tests.

pub mod api;
pub mod config;
pub mod state;
