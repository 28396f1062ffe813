//! Core tales library (config, backend client, session and item controllers).

pub mod api;
pub mod config;
pub mod items;
pub mod logging;
pub mod session;
pub mod story;
