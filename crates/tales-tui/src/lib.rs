//! Full-screen TUI for tales.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use features::{items, session};
pub use runtime::TuiRuntime;
use tales_core::api::BackendClient;
use tales_core::config::Config;
use tales_core::session::{FileSessionStore, SessionController};

use crate::state::AppState;

fn ensure_terminal() -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive view requires a terminal.\n\
             Use `tales items list` or `tales read` for non-interactive output."
        );
    }
    Ok(())
}

/// Runs the interactive session screen (sign-in form, then the story).
///
/// # Errors
/// Returns an error if no terminal is attached, the backend URL is invalid,
/// or terminal I/O fails.
pub async fn run_session(config: &Config, store: FileSessionStore) -> Result<()> {
    ensure_terminal()?;
    let backend = BackendClient::from_config(config)?;
    let controller = SessionController::initialize(store);

    let mut runtime = TuiRuntime::new(backend, AppState::session(controller))?;
    runtime.run()
}

/// Runs the interactive item list.
///
/// # Errors
/// Returns an error if no terminal is attached, the backend URL is invalid,
/// or terminal I/O fails.
pub async fn run_item_viewer(config: &Config) -> Result<()> {
    ensure_terminal()?;
    let backend = BackendClient::from_config(config)?;

    let mut runtime = TuiRuntime::new(backend, AppState::items())?;
    runtime.run()
}
