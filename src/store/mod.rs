//! Reducer-backed state storage.
//!
//! A [`Store`] holds the committed state of one toggle and tells
//! subscribers whenever a new state is committed.

mod store;

pub use store::{Store, Subscription};
