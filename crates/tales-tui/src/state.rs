//! Application state composition.
//!
//! ```text
//! AppState
//! ├── screen: Screen
//! │   ├── Items(ItemsState)     (item viewer + card scroll)
//! │   └── Session(SessionState) (session controller + form focus + story scroll)
//! ├── should_quit
//! ├── spinner_frame
//! └── viewport_height
//! ```

use tales_core::session::{FileSessionStore, SessionController};

use crate::items::ItemsState;
use crate::session::SessionState;

/// Which controller this run of the TUI drives.
#[derive(Debug)]
pub enum Screen {
    Items(ItemsState),
    Session(SessionState),
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub should_quit: bool,
    /// Advanced on every tick while something is loading.
    pub spinner_frame: usize,
    /// Terminal height from the last frame, used for page scrolling.
    pub viewport_height: u16,
}

impl AppState {
    pub fn items() -> Self {
        Self::with_screen(Screen::Items(ItemsState::new()))
    }

    pub fn session(controller: SessionController<FileSessionStore>) -> Self {
        Self::with_screen(Screen::Session(SessionState::new(controller)))
    }

    fn with_screen(screen: Screen) -> Self {
        Self {
            screen,
            should_quit: false,
            spinner_frame: 0,
            viewport_height: 0,
        }
    }

    /// True while a backend call is outstanding.
    pub fn is_busy(&self) -> bool {
        match &self.screen {
            Screen::Items(items) => items.viewer.is_loading(),
            Screen::Session(session) => session.controller.is_pending(),
        }
    }
}
