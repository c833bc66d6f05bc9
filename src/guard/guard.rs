use std::fmt;

const READ_ONLY_MESSAGE: &str = "Failed prop type: You provided a `value` prop to a form field \
without an `onChange` handler. This will render a read-only field. If the field should be \
mutable use `defaultValue`. Otherwise, set either `onChange` or `readOnly`.";

/// An advisory warning about how a toggle is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// A controlled value was supplied before and is absent now.
    ControlledToUncontrolled,
    /// No controlled value was supplied before and one is present now.
    UncontrolledToControlled,
    /// A controlled value is supplied without a change handler.
    ReadOnly,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ControlledToUncontrolled => "changed from controlled to uncontrolled",
            Self::UncontrolledToControlled => "changed from uncontrolled to controlled",
            Self::ReadOnly => READ_ONLY_MESSAGE,
        })
    }
}

/// Watches the externally supplied `on` value across commits.
///
/// The guard remembers the value seen at the previous commit and compares
/// each new one against it. It never changes control flow; findings are
/// logged with `tracing::warn!` and returned for inspection.
#[derive(Debug, Clone)]
pub struct ModeGuard {
    previous: Option<bool>,
    enabled: bool,
}

impl ModeGuard {
    /// Create a guard whose first-seen value is `initial`.
    pub fn new(initial: Option<bool>, enabled: bool) -> Self {
        Self {
            previous: initial,
            enabled,
        }
    }

    /// Turn diagnostics on or off. Observations are still recorded while off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether diagnostics are emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The value recorded at the last observation.
    pub fn previous(&self) -> Option<bool> {
        self.previous
    }

    /// Observe a committed update.
    ///
    /// `on` is the externally supplied value, not the effective one.
    pub fn observe(&mut self, on: Option<bool>, has_on_change: bool) -> Vec<Diagnostic> {
        let mut found = Vec::new();

        match (self.previous, on) {
            (Some(_), None) => found.push(Diagnostic::ControlledToUncontrolled),
            (None, Some(_)) => found.push(Diagnostic::UncontrolledToControlled),
            _ => {}
        }
        if on.is_some() && !has_on_change {
            found.push(Diagnostic::ReadOnly);
        }
        self.previous = on;

        if !self.enabled {
            return Vec::new();
        }
        for diagnostic in &found {
            tracing::warn!(target: "flipswitch::guard", "{diagnostic}");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_only_checks_read_only() {
        let mut guard = ModeGuard::new(Some(true), true);
        assert!(guard.observe(Some(true), true).is_empty());

        let mut guard = ModeGuard::new(None, true);
        assert!(guard.observe(None, false).is_empty());

        let mut guard = ModeGuard::new(Some(false), true);
        assert_eq!(guard.observe(Some(false), false), vec![Diagnostic::ReadOnly]);
    }

    #[test]
    fn detects_mode_flips() {
        let mut guard = ModeGuard::new(Some(true), true);
        assert_eq!(
            guard.observe(None, true),
            vec![Diagnostic::ControlledToUncontrolled]
        );
        assert_eq!(guard.previous(), None);
        assert_eq!(
            guard.observe(Some(false), true),
            vec![Diagnostic::UncontrolledToControlled]
        );
        assert!(guard.observe(Some(true), true).is_empty());
    }

    #[test]
    fn read_only_is_checked_every_update() {
        let mut guard = ModeGuard::new(None, true);
        assert_eq!(
            guard.observe(Some(true), false),
            vec![Diagnostic::UncontrolledToControlled, Diagnostic::ReadOnly]
        );
        assert_eq!(guard.observe(Some(true), false), vec![Diagnostic::ReadOnly]);
        assert!(guard.observe(Some(true), true).is_empty());
    }

    #[test]
    fn disabled_guard_stays_silent_but_tracks() {
        let mut guard = ModeGuard::new(Some(true), false);
        assert!(guard.observe(None, false).is_empty());
        assert_eq!(guard.previous(), None);

        guard.set_enabled(true);
        assert_eq!(
            guard.observe(Some(true), true),
            vec![Diagnostic::UncontrolledToControlled]
        );
    }
}
