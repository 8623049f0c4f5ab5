//! Attribute values and attribute maps.
//!
//! The directory server models every object as a flat bag of named
//! attributes. The same shape is used in three places: the declared state a
//! caller wants, the keyword-argument bundle sent with a call, and the entry
//! returned by a show call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single attribute value.
///
/// The wire surface only ever carries four shapes: scalar strings, scalar
/// integers, scalar booleans, and ordered lists of strings. Timestamps travel
/// as strings in the server's generalized-time format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A single string value.
    Str(String),
    /// A single integer value.
    Int(i64),
    /// A single boolean value.
    Bool(bool),
    /// An ordered list of string values.
    List(Vec<String>),
}

impl AttrValue {
    /// Get as a string if this is a scalar string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as an integer if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a list if this is multi-valued.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the single string carried by this value, unwrapping a
    /// one-element list.
    ///
    /// Show results frequently wrap scalars in single-element lists; this
    /// accessor papers over that.
    pub fn as_scalar_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            AttrValue::List(items) if items.len() == 1 => Some(&items[0]),
            _ => None,
        }
    }

    /// Get the strings carried by this value, scalar or list.
    pub fn as_strings(&self) -> Vec<&str> {
        match self {
            AttrValue::Str(s) => vec![s.as_str()],
            AttrValue::List(items) => items.iter().map(String::as_str).collect(),
            _ => vec![],
        }
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        AttrValue::Int(i64::from(i))
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(items: Vec<&str>) -> Self {
        AttrValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// An ordered map of attribute names to values.
///
/// Backed by a `BTreeMap` so iteration (and therefore any call bundle built
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(flatten)]
    values: BTreeMap<String, AttrValue>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set an attribute using builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    /// Get a scalar string attribute (unwrapping a one-element list).
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_scalar_str)
    }

    /// Get an integer attribute.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(AttrValue::as_int)
    }

    /// Get a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttrValue::as_bool)
    }

    /// Get the strings of a multi-valued attribute.
    pub fn get_strings(&self, name: &str) -> Vec<&str> {
        self.get(name).map(AttrValue::as_strings).unwrap_or_default()
    }

    /// Check whether an attribute is present.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.values.remove(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove all attributes.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterate over attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over all attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.values.iter()
    }

    /// Overlay another attribute map onto this one, replacing on collision.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, value) in other.iter() {
            self.values.insert(name.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, AttrValue)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, AttrValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        let attrs = Attributes::new()
            .with("login", "jdoe")
            .with("uid_number", 1500i64)
            .with("active", true);

        assert_eq!(attrs.get_str("login"), Some("jdoe"));
        assert_eq!(attrs.get_int("uid_number"), Some(1500));
        assert_eq!(attrs.get_bool("active"), Some(true));
        assert!(!attrs.has("missing"));
    }

    #[test]
    fn test_scalar_str_unwraps_single_element_list() {
        let attrs = Attributes::new().with("cn", vec!["Jane Doe"]);
        assert_eq!(attrs.get_str("cn"), Some("Jane Doe"));

        let multi = Attributes::new().with("mail", vec!["a@x", "b@x"]);
        assert_eq!(multi.get_str("mail"), None);
        assert_eq!(multi.get_strings("mail"), vec!["a@x", "b@x"]);
    }

    #[test]
    fn test_merge_replaces_on_collision() {
        let mut base = Attributes::new().with("shell", "/bin/sh").with("gecos", "x");
        let overlay = Attributes::new().with("shell", "/bin/zsh");

        base.merge(&overlay);
        assert_eq!(base.get_str("shell"), Some("/bin/zsh"));
        assert_eq!(base.get_str("gecos"), Some("x"));
    }

    #[test]
    fn test_deterministic_iteration_order() {
        let attrs = Attributes::new().with("b", "2").with("a", "1").with("c", "3");
        let names: Vec<&str> = attrs.names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialization_round_trip() {
        let attrs = Attributes::new()
            .with("login", "jdoe")
            .with("mail", vec!["jdoe@example.test"]);

        let json = serde_json::to_string(&attrs).unwrap();
        let parsed: Attributes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, attrs);
    }
}
