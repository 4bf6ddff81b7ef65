//! Ordered map type for INI sections.
//!
//! This module provides [`IniMap`], a wrapper around [`IndexMap`] that maintains
//! insertion order for section entries. The encoder walks entries in insertion
//! order, so the same document always produces the same text.
//!
//! ## Why IndexMap?
//!
//! - **Deterministic output**: keys and sections are written in the order they were added
//! - **Order-insensitive equality**: two maps with the same entries compare equal
//!   regardless of order, which is what a decode/encode round trip preserves
//! - **No inherited slots**: an `IndexMap` owns every key it holds; there is no
//!   shared structural entry reachable through a special key name
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{IniMap, Value};
//!
//! let mut map = IniMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("admin".to_string(), Value::from(true));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// An ordered map of string keys to INI values. This is the document type.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{IniMap, Value};
///
/// let mut map = IniMap::new();
/// map.insert("first".to_string(), Value::from("1"));
/// map.insert("second".to_string(), Value::from("2"));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IniMap(IndexMap<String, Value>);

impl IniMap {
    /// Creates an empty `IniMap`.
    #[must_use]
    pub fn new() -> Self {
        IniMap(IndexMap::new())
    }

    /// Creates an empty `IniMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        IniMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and the
    /// key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{IniMap, Value};
    ///
    /// let mut map = IniMap::new();
    /// assert!(map.insert("key".to_string(), Value::from("a")).is_none());
    /// assert!(map.insert("key".to_string(), Value::from("b")).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{IniMap, Value};
    ///
    /// let mut map: IniMap = [("a", "1"), ("b", "2"), ("c", "3")]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), Value::from(v)))
    ///     .collect();
    /// map.remove("a");
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["b", "c"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the section stored under `key`, inserting an empty one first if the
    /// key is missing or holds a non-section value.
    pub fn section_mut(&mut self, key: &str) -> &mut IniMap {
        let index = match self.0.get_index_of(key) {
            Some(index) => index,
            None => self.0.insert_full(key.to_string(), Value::Null).0,
        };
        let slot = &mut self.0[index];
        if !slot.is_section() {
            *slot = Value::Section(IniMap::new());
        }
        match slot {
            Value::Section(map) => map,
            _ => unreachable!("slot was just replaced with a section"),
        }
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl Default for IniMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, Value>> for IniMap {
    fn from(map: HashMap<String, Value>) -> Self {
        IniMap(map.into_iter().collect())
    }
}

impl From<IniMap> for HashMap<String, Value> {
    fn from(map: IniMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for IniMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a IniMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for IniMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        IniMap(IndexMap::from_iter(iter))
    }
}

impl Serialize for IniMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IniMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Section(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "expected a section, found {}",
                other.kind()
            ))),
        }
    }
}
