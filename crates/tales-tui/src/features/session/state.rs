use tales_core::session::{FileSessionStore, SessionController};
use tales_core::story;

/// Focusable controls of the sign-in form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Phone,
    Password,
    Login,
    Register,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Phone => Focus::Password,
            Focus::Password => Focus::Login,
            Focus::Login => Focus::Register,
            Focus::Register => Focus::Phone,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Phone => Focus::Register,
            Focus::Password => Focus::Phone,
            Focus::Login => Focus::Password,
            Focus::Register => Focus::Login,
        }
    }

    pub fn is_field(self) -> bool {
        matches!(self, Focus::Phone | Focus::Password)
    }
}

/// Session screen: the controller plus purely visual state.
#[derive(Debug)]
pub struct SessionState {
    pub controller: SessionController<FileSessionStore>,
    pub focus: Focus,
    /// First visible story line.
    pub story_scroll: u16,
}

impl SessionState {
    pub fn new(controller: SessionController<FileSessionStore>) -> Self {
        Self {
            controller,
            focus: Focus::default(),
            story_scroll: 0,
        }
    }

    /// Buffer behind the focused field, if a field has focus.
    pub fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Phone => Some(self.controller.phone_mut()),
            Focus::Password => Some(self.controller.password_mut()),
            Focus::Login | Focus::Register => None,
        }
    }

    pub fn scroll_story_up(&mut self, n: u16) {
        self.story_scroll = self.story_scroll.saturating_sub(n);
    }

    pub fn scroll_story_down(&mut self, n: u16) {
        let lines = story::layout(story::BODY, self.controller.mode()).len();
        let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
        self.story_scroll = self.story_scroll.saturating_add(n).min(max);
    }
}
