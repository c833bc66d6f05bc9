use std::borrow::Cow;

/// Result alias used throughout the crate.
pub type Result<T, E = ToggleError> = std::result::Result<T, E>;

/// Errors raised while dispatching an action.
///
/// These are programmer errors. They abort the dispatch that raised them and
/// surface to whoever triggered it (a `toggle()` call or a click handler).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    /// A reducer received an action tag it does not know how to apply.
    #[error("Unsupported type: {action}")]
    UnsupportedAction {
        /// The tag of the rejected action.
        action: String,
    },
    /// A caller-supplied event handler reported a failure.
    #[error("handler failed: {0}")]
    Handler(Cow<'static, str>),
}

impl ToggleError {
    /// Create an [`ToggleError::UnsupportedAction`] for the given tag.
    pub fn unsupported(action: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    /// Create a [`ToggleError::Handler`] with the given message.
    pub fn handler(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Handler(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_action_names_the_tag() {
        let err = ToggleError::unsupported("bogus");
        assert_eq!(err.to_string(), "Unsupported type: bogus");
    }
}
