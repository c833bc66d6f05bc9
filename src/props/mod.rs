//! Attribute/handler bags produced by prop getters.

mod props;

pub use props::{PropsBag, PRESSED_ATTR};
