//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself; backend calls are described here
//! and the runtime spawns them.

use tales_core::api::AuthRequest;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the item list. Emitted once per item screen.
    FetchItems,

    /// Send a register or login request.
    Authenticate { request: AuthRequest },
}
