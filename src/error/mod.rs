//! Error types shared by the reducer, the handlers and the controller.

mod error;

pub use error::{Result, ToggleError};
