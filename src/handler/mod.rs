//! Event handlers and the combinator that chains them.
//!
//! Prop getters never replace a caller's handler. They chain it in front of
//! their own with [`call_all`], so both run on every event.

mod handler;

pub use handler::{call_all, Handler};
