use crate::error::Result;
use crate::handler::{call_all, Handler};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Attribute carrying the pressed state of a toggler.
pub const PRESSED_ATTR: &str = "aria-pressed";

/// An open set of attributes plus a click handler, handed to a view.
///
/// Attributes keep insertion order. The click handler is held apart from the
/// attributes because it is never overwritten by a merge, only chained.
pub struct PropsBag<E = ()> {
    attrs: IndexMap<String, Value>,
    on_click: Option<Handler<E>>,
}

impl<E> PropsBag<E> {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
            on_click: None,
        }
    }

    /// Add an attribute, replacing any previous value under `key`.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the click handler.
    #[must_use]
    pub fn with_on_click(mut self, handler: Handler<E>) -> Self {
        self.on_click = Some(handler);
        self
    }

    /// Insert an attribute in place, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// The pressed indicator, if this bag carries one.
    pub fn pressed(&self) -> Option<bool> {
        self.get(PRESSED_ATTR).and_then(Value::as_bool)
    }

    /// Iterate attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of attributes; the click handler is not counted.
    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }

    /// No attributes and no click handler.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.on_click.is_none()
    }

    pub fn on_click(&self) -> Option<&Handler<E>> {
        self.on_click.as_ref()
    }

    /// Invoke the click handler, if any, as a view would on interaction.
    pub fn click(&self, event: &E) -> Result<()> {
        match &self.on_click {
            Some(handler) => handler.call(event),
            None => Ok(()),
        }
    }
}

impl<E: 'static> PropsBag<E> {
    /// Merge caller `overrides` over controller `defaults`.
    ///
    /// Precedence:
    /// - attributes from `overrides` replace same-named `defaults`, others
    ///   are kept, default keys first and then new caller keys in order;
    /// - `on_click` is never replaced: the result calls the caller's handler
    ///   first, then the default one.
    pub fn merge(defaults: Self, overrides: Self) -> Self {
        let Self {
            mut attrs,
            on_click: default_click,
        } = defaults;
        attrs.extend(overrides.attrs);

        let on_click = match (overrides.on_click, default_click) {
            (None, None) => None,
            (caller, internal) => Some(call_all([caller, internal])),
        };
        Self { attrs, on_click }
    }
}

impl<E> Default for PropsBag<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for PropsBag<E> {
    fn clone(&self) -> Self {
        Self {
            attrs: self.attrs.clone(),
            on_click: self.on_click.clone(),
        }
    }
}

impl<E> fmt::Debug for PropsBag<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropsBag")
            .field("attrs", &self.attrs)
            .field("on_click", &self.on_click)
            .finish()
    }
}

// Handlers are not data; only attributes are serialized.
impl<E> Serialize for PropsBag<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.attrs.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn tracked(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Handler {
        let log = Arc::clone(log);
        Handler::new(move |_: &()| log.lock().unwrap().push(name))
    }

    #[test]
    fn caller_attrs_win() {
        let defaults: PropsBag = PropsBag::new().attr(PRESSED_ATTR, false).attr("role", "switch");
        let overrides = PropsBag::new().attr("role", "button").attr("id", "custom");

        let merged = PropsBag::merge(defaults, overrides);

        assert_eq!(merged.get("role"), Some(&json!("button")));
        assert_eq!(merged.get("id"), Some(&json!("custom")));
        assert_eq!(merged.pressed(), Some(false));
        let keys: Vec<&str> = merged.attrs().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![PRESSED_ATTR, "role", "id"]);
    }

    #[test]
    fn click_handlers_are_chained() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let defaults = PropsBag::new().with_on_click(tracked("internal", &log));
        let overrides = PropsBag::new().with_on_click(tracked("caller", &log));

        let merged = PropsBag::merge(defaults, overrides);
        merged.click(&()).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["caller", "internal"]);
    }

    #[test]
    fn empty_bags_merge_to_empty() {
        let merged: PropsBag = PropsBag::merge(PropsBag::new(), PropsBag::new());
        assert!(merged.is_empty());
        assert!(merged.on_click().is_none());
        assert!(merged.click(&()).is_ok());
    }

    #[test]
    fn handler_only_bag_is_not_empty() {
        let bag: PropsBag = PropsBag::new().with_on_click(Handler::new(|_: &()| {}));
        assert_eq!(bag.attr_count(), 0);
        assert!(!bag.is_empty());

        let bag = bag.attr("id", "x");
        assert_eq!(bag.attr_count(), 1);
    }

    #[test]
    fn serializes_attributes_only() {
        let bag: PropsBag = PropsBag::new()
            .attr(PRESSED_ATTR, true)
            .attr("data-x", 1)
            .with_on_click(Handler::new(|_: &()| {}));

        assert_eq!(
            serde_json::to_value(&bag).unwrap(),
            json!({ "aria-pressed": true, "data-x": 1 })
        );
    }
}
