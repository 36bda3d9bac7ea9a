//! Theme preference use case

use crate::domain::Theme;
use crate::infrastructure::{ClientState, KeyValueStore};

pub struct ThemeService<S> {
    state: ClientState<S>,
}

impl<S: KeyValueStore> ThemeService<S> {
    pub fn new(state: ClientState<S>) -> Self {
        ThemeService { state }
    }

    pub fn current(&self) -> Theme {
        self.state.theme()
    }

    pub fn set(&self, theme: Theme) -> Theme {
        self.state.set_theme(theme);
        theme
    }

    pub fn toggle(&self) -> Theme {
        self.set(self.current().toggled())
    }
}
