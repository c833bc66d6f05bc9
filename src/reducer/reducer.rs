use crate::error::{Result, ToggleError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// The authoritative state of an uncontrolled toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToggleState {
    /// Whether the toggle is on.
    pub on: bool,
}

impl ToggleState {
    /// Create a state with the given `on` value.
    pub const fn new(on: bool) -> Self {
        Self { on }
    }
}

/// A requested state transition.
///
/// `Custom` carries a tag for reducers that extend the built-in behaviour;
/// [`toggle_reducer`] rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAction", into = "RawAction")]
pub enum Action {
    /// Flip the `on` value.
    Toggle,
    /// Restore the state the toggle was created with.
    Reset {
        /// The originally configured state.
        initial_state: ToggleState,
    },
    /// An action unknown to the built-in reducer.
    Custom(Cow<'static, str>),
}

// `{"type": "...", "initialState": {...}}`
#[derive(Serialize, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(
        rename = "initialState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    initial_state: Option<ToggleState>,
}

impl From<RawAction> for Action {
    fn from(raw: RawAction) -> Self {
        match (raw.kind.as_str(), raw.initial_state) {
            ("toggle", _) => Self::Toggle,
            ("reset", Some(initial_state)) => Self::Reset { initial_state },
            _ => Self::Custom(Cow::Owned(raw.kind)),
        }
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        let kind = action.kind().to_string();
        let initial_state = match action {
            Action::Reset { initial_state } => Some(initial_state),
            _ => None,
        };
        Self {
            kind,
            initial_state,
        }
    }
}

/// The tag of an [`Action`], without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    Toggle,
    Reset,
    Custom(Cow<'static, str>),
}

impl Action {
    /// Build a custom action with the given tag.
    pub fn custom(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(tag.into())
    }

    /// The tag of this action.
    pub fn kind(&self) -> ActionType {
        match self {
            Self::Toggle => ActionType::Toggle,
            Self::Reset { .. } => ActionType::Reset,
            Self::Custom(tag) => ActionType::Custom(tag.clone()),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle => f.write_str("toggle"),
            Self::Reset => f.write_str("reset"),
            Self::Custom(tag) => f.write_str(tag),
        }
    }
}

/// A shareable state transition function.
///
/// Reducers must be pure: the controller also calls them purely to compute
/// a suggested state that is never committed.
pub type Reducer = Arc<dyn Fn(&ToggleState, &Action) -> Result<ToggleState> + Send + Sync>;

/// The built-in reducer.
///
/// # Examples
///
/// ```
/// use flipswitch::{toggle_reducer, Action, ToggleState};
///
/// let state = ToggleState::new(false);
/// assert_eq!(toggle_reducer(&state, &Action::Toggle), Ok(ToggleState::new(true)));
///
/// let reset = Action::Reset { initial_state: ToggleState::new(true) };
/// assert_eq!(toggle_reducer(&state, &reset), Ok(ToggleState::new(true)));
///
/// assert!(toggle_reducer(&state, &Action::custom("bogus")).is_err());
/// ```
pub fn toggle_reducer(state: &ToggleState, action: &Action) -> Result<ToggleState> {
    match action {
        Action::Toggle => Ok(ToggleState { on: !state.on }),
        Action::Reset { initial_state } => Ok(*initial_state),
        Action::Custom(tag) => Err(ToggleError::unsupported(tag.as_ref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        let on = ToggleState::new(true);
        assert_eq!(toggle_reducer(&on, &Action::Toggle), Ok(ToggleState::new(false)));
        let off = toggle_reducer(&on, &Action::Toggle).unwrap();
        assert_eq!(toggle_reducer(&off, &Action::Toggle), Ok(on));
    }

    #[test]
    fn reset_returns_carried_state() {
        let reset = Action::Reset {
            initial_state: ToggleState::new(true),
        };
        assert_eq!(
            toggle_reducer(&ToggleState::new(false), &reset),
            Ok(ToggleState::new(true))
        );
        assert_eq!(
            toggle_reducer(&ToggleState::new(true), &reset),
            Ok(ToggleState::new(true))
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let state = ToggleState::new(false);
        let err = toggle_reducer(&state, &Action::custom("bogus")).unwrap_err();
        assert_eq!(
            err,
            ToggleError::UnsupportedAction {
                action: "bogus".to_string()
            }
        );
        assert_eq!(state, ToggleState::new(false));
    }

    #[test]
    fn actions_use_wire_shape() {
        let toggle = serde_json::to_value(Action::Toggle).unwrap();
        assert_eq!(toggle, serde_json::json!({ "type": "toggle" }));

        let reset = serde_json::to_value(Action::Reset {
            initial_state: ToggleState::new(true),
        })
        .unwrap();
        assert_eq!(
            reset,
            serde_json::json!({ "type": "reset", "initialState": { "on": true } })
        );

        let parsed: Action = serde_json::from_value(reset).unwrap();
        assert_eq!(parsed.kind(), ActionType::Reset);

        let bogus: Action = serde_json::from_value(serde_json::json!({ "type": "bogus" })).unwrap();
        assert_eq!(bogus, Action::custom("bogus"));
    }

    #[test]
    fn action_type_displays_tag() {
        assert_eq!(Action::Toggle.kind().to_string(), "toggle");
        assert_eq!(Action::custom("bogus").kind().to_string(), "bogus");
    }
}
