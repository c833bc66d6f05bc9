//! Toggle state, actions and the pure transition function.

mod reducer;

pub use reducer::{toggle_reducer, Action, ActionType, Reducer, ToggleState};
