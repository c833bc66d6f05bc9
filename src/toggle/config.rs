use crate::error::Result;
use crate::reducer::{toggle_reducer, Action, Reducer, ToggleState};
use std::fmt;
use std::sync::Arc;

/// Change callback, called with the suggested state and the action.
pub type OnChange = Arc<dyn Fn(&ToggleState, &Action) + Send + Sync>;

/// Options for a [`Toggle`](crate::Toggle).
///
/// | option        | default                     |
/// |---------------|-----------------------------|
/// | `initial_on`  | `false`                     |
/// | `reducer`     | [`toggle_reducer`]          |
/// | `on`          | `None` (uncontrolled)       |
/// | `on_change`   | `None`                      |
/// | `diagnostics` | `cfg!(debug_assertions)`    |
///
/// `initial_on` is only read when the toggle is created. Every other option
/// may be re-supplied through [`Toggle::update`](crate::Toggle::update).
#[derive(Clone)]
pub struct ToggleConfig {
    pub(crate) initial_on: bool,
    pub(crate) reducer: Reducer,
    pub(crate) on: Option<bool>,
    pub(crate) on_change: Option<OnChange>,
    pub(crate) diagnostics: bool,
}

impl ToggleConfig {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state the toggle starts with and resets to.
    #[must_use]
    pub fn initial_on(mut self, initial_on: bool) -> Self {
        self.initial_on = initial_on;
        self
    }

    /// Replace the transition function.
    #[must_use]
    pub fn reducer<F>(mut self, reducer: F) -> Self
    where
        F: Fn(&ToggleState, &Action) -> Result<ToggleState> + Send + Sync + 'static,
    {
        self.reducer = Arc::new(reducer);
        self
    }

    /// Supply the externally controlled value. `None` means uncontrolled.
    #[must_use]
    pub fn on(mut self, on: Option<bool>) -> Self {
        self.on = on;
        self
    }

    /// Shorthand for `on(Some(on))`.
    #[must_use]
    pub fn controlled(self, on: bool) -> Self {
        self.on(Some(on))
    }

    /// Set the change callback.
    ///
    /// A callback that captures a [`Toggle`](crate::Toggle) clone of the
    /// toggle it is installed on forms a reference cycle that is never
    /// freed; capture [`Toggle::downgrade`](crate::Toggle::downgrade) instead.
    #[must_use]
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&ToggleState, &Action) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Enable or disable mode-change diagnostics.
    ///
    /// Release builds default to disabled.
    #[must_use]
    pub fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            initial_on: false,
            reducer: Arc::new(toggle_reducer),
            on: None,
            on_change: None,
            diagnostics: cfg!(debug_assertions),
        }
    }
}

impl fmt::Debug for ToggleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleConfig")
            .field("initial_on", &self.initial_on)
            .field("on", &self.on)
            .field("on_change", &self.on_change.is_some())
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToggleConfig::default();
        assert!(!config.initial_on);
        assert_eq!(config.on, None);
        assert!(config.on_change.is_none());
        assert_eq!(config.diagnostics, cfg!(debug_assertions));
        assert_eq!(
            (config.reducer)(&ToggleState::new(false), &Action::Toggle),
            Ok(ToggleState::new(true))
        );
    }

    #[test]
    fn builder_sets_fields() {
        let config = ToggleConfig::new()
            .initial_on(true)
            .controlled(false)
            .on_change(|_, _| {})
            .diagnostics(false);

        assert!(config.initial_on);
        assert_eq!(config.on, Some(false));
        assert!(config.on_change.is_some());
        assert!(!config.diagnostics);
    }
}
