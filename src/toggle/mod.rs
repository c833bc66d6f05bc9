//! The toggle controller.
//!
//! A [`Toggle`] is driven either by its own committed state (uncontrolled)
//! or by an `on` value its owner supplies on every update (controlled).
//! In controlled mode actions are only proposed through `on_change`.

mod config;
mod toggle;

pub use config::{OnChange, ToggleConfig};
pub use toggle::{Toggle, WeakToggle};
