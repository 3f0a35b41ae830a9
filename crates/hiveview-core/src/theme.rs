//! Explicit theme context handed to renderers.
//!
//! Renderers read the current [`Theme`] from the context they are given;
//! components that cache styled output subscribe for changes and must
//! unsubscribe when they go away.
//!
//! The listener API (`subscribe`, `unsubscribe`, `set_theme`) is for
//! long-lived embedders of this crate. The `hiveview` CLI resolves the theme
//! once per invocation and only reads it.

use std::fmt;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// No styling escapes.
    #[default]
    Plain,
    /// ANSI colors keyed by health tier.
    Color,
}

/// Handle returned by [`ThemeContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn Fn(Theme) + Send + Sync>;

#[derive(Default)]
pub struct ThemeContext {
    theme: Theme,
    next_id: u64,
    listeners: Vec<(Subscription, Listener)>,
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.theme)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_color(&self) -> bool {
        self.theme == Theme::Color
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        before != self.listeners.len()
    }

    /// Switch theme; listeners run only on an actual change.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        debug!(?theme, listeners = self.listeners.len(), "theme changed");
        self.theme = theme;
        for (_, listener) in &self.listeners {
            listener(theme);
        }
    }
}
