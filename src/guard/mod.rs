//! Diagnostics for controlled/uncontrolled misuse.

mod guard;

pub use guard::{Diagnostic, ModeGuard};
