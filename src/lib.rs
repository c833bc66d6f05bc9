//! # Flipswitch
//!
//! A two-state toggle controller that can be driven internally or by its
//! owner, with prop getters that compose caller behaviour with its own.
//!
//! ## Modes
//!
//! - **Uncontrolled**: the [`Toggle`] commits every action to its own state.
//! - **Controlled**: the owner supplies `on` with every update and receives
//!   proposals through `on_change`; internal state stays frozen.
//!
//! ## Building blocks
//!
//! - [`toggle_reducer`] - pure transition function over [`ToggleState`]
//! - [`call_all`] - chains optional [`Handler`]s without dropping any
//! - [`PropsBag`] - attributes plus a click handler for a view
//! - [`ModeGuard`] - warns when a toggle flips between modes
//!
//! ```
//! use flipswitch::{Handler, PropsBag, Toggle, ToggleConfig};
//!
//! let toggle = Toggle::new(ToggleConfig::default());
//! let props = toggle.toggler_props(
//!     PropsBag::new()
//!         .attr("id", "wifi")
//!         .with_on_click(Handler::new(|_: &()| println!("clicked"))),
//! );
//! assert_eq!(props.pressed(), Some(false));
//!
//! props.click(&()).unwrap();
//! assert!(toggle.on());
//! ```

pub mod error;
pub mod guard;
pub mod handler;
pub mod props;
pub mod reducer;
pub mod store;
pub mod toggle;

// Re-export main types for convenience
pub use error::{Result, ToggleError};
pub use guard::{Diagnostic, ModeGuard};
pub use handler::{call_all, Handler};
pub use props::{PropsBag, PRESSED_ATTR};
pub use reducer::{toggle_reducer, Action, ActionType, Reducer, ToggleState};
pub use store::{Store, Subscription};
pub use toggle::{OnChange, Toggle, ToggleConfig, WeakToggle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let toggle = Toggle::new(ToggleConfig::new());
        assert!(!toggle.on());
        toggle.toggle().unwrap();
        assert!(toggle.on());
    }
}
