//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod items;
pub mod story;
pub mod users;
