//! Theme change notifications.

use std::time::SystemTime;

use serde::Serialize;

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeChangeKind {
    /// A theme was loaded and activated.
    ThemeSwitched,
    /// Dark mode was turned on or off.
    DarkModeToggled,
}

/// Sent to observers after a state transition commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChangeEvent {
    /// What changed.
    pub kind: ThemeChangeKind,
    /// The theme active before the change, if any.
    pub previous_theme: Option<String>,
    /// The theme active after the change. `None` only when dark mode is
    /// toggled before any theme is set.
    pub new_theme: Option<String>,
    /// Dark mode after the change.
    pub dark_mode: bool,
    /// Tenant the active theme was loaded for.
    pub tenant_id: Option<String>,
    /// When the change committed.
    pub timestamp: SystemTime,
}

/// Receives [ThemeChangeEvent]s from a [Runtime](crate::Runtime).
///
/// Observers run on the thread that made the change, after the runtime's
/// locks are released, so they may query the runtime or switch themes
/// themselves.
pub trait ThemeObserver: Send + Sync {
    /// Called once per committed change.
    fn on_theme_changed(&self, event: &ThemeChangeEvent);
}

impl<F> ThemeObserver for F
where
    F: Fn(&ThemeChangeEvent) + Send + Sync,
{
    fn on_theme_changed(&self, event: &ThemeChangeEvent) {
        self(event)
    }
}
