//! Case-insensitive string map.
//!
//! - [`CiStringMap`] - String map whose keys are stored lowercased

use std::collections::HashMap;
use std::collections::hash_map;

/// A string-to-string map with case-insensitive keys.
///
/// Keys are lowercased before storage and lookup, so the original casing is
/// never observed back. Iteration order is unspecified.
///
/// # Example
///
/// ```
/// use segmentrs::CiStringMap;
///
/// let mut map = CiStringMap::new();
/// map.set("Content-Type", "text/plain");
///
/// assert_eq!(map.get("content-type"), Some("text/plain"));
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec!["content-type"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiStringMap {
    entries: HashMap<String, String>,
}

impl CiStringMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize(key)).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize(key))
    }

    /// Inserts `value` under `key`, replacing any value stored under a
    /// differently-cased form of the same key.
    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries.insert(normalize(key.as_ref()), value.into());
    }

    /// Removes `key`, returning its value if it was present.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.entries.remove(&normalize(key))
    }

    /// Merges `entries` into the map. Later entries win on key collision.
    pub fn update<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Returns the normalized keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Visits every key/value pair.
    pub fn items<F: FnMut(&str, &str)>(&self, mut callback: F) {
        for (key, value) in &self.entries {
            callback(key.as_str(), value.as_str());
        }
    }

    /// Returns an iterator over key/value pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

/// Iterator over the entries of a [`CiStringMap`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a CiStringMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CiStringMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.update(iter);
        map
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for CiStringMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}
