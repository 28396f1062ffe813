use tales_core::items::ItemViewer;

/// Item list screen: the viewer plus a card scroll offset.
#[derive(Debug, Default)]
pub struct ItemsState {
    pub viewer: ItemViewer,
    /// Index of the first visible card.
    pub scroll: usize,
}

impl ItemsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        let max = self.viewer.items().len().saturating_sub(1);
        self.scroll = (self.scroll + n).min(max);
    }
}

#[cfg(test)]
mod tests {
    use tales_core::api::Item;

    use super::*;

    #[test]
    fn test_scroll_clamps_to_cards() {
        let mut state = ItemsState::new();
        state.scroll_down(3);
        assert_eq!(state.scroll, 0);

        let items = (1..=3)
            .map(|id| Item {
                id,
                name: format!("Item {id}"),
                description: None,
            })
            .collect();
        state.viewer.apply(Ok(items));
        state.scroll_down(10);
        assert_eq!(state.scroll, 2);
        state.scroll_up(1);
        assert_eq!(state.scroll, 1);
        state.scroll_up(5);
        assert_eq!(state.scroll, 0);
    }
}
