//! Shared helpers used across feature slices.

pub mod text;
