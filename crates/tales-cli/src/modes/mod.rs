//! Interactive modes.
//!
//! The full-screen views live behind the optional `tui` feature; without it
//! the interactive commands fail with a hint instead.

#[cfg(feature = "tui")]
pub use tales_tui::{run_item_viewer, run_session};

#[cfg(not(feature = "tui"))]
pub async fn run_session(
    _config: &tales_core::config::Config,
    _store: tales_core::session::FileSessionStore,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}

#[cfg(not(feature = "tui"))]
pub async fn run_item_viewer(_config: &tales_core::config::Config) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
