//! Tag Index Module
//!
//! Maps each tag to the set of keys currently carrying it, so a whole group of
//! entries can be dropped with one call.

use std::collections::{HashMap, HashSet};

// == Tag Index ==
/// Reverse index from tag to keys.
///
/// Buckets are dropped as soon as they become empty; the index never holds a
/// tag with no members.
#[derive(Debug, Default)]
pub struct TagIndex {
    buckets: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    /// Creates an empty tag index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` under each of `tags`.
    pub fn attach<'a>(&mut self, key: &str, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            self.buckets
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
        }
    }

    /// Unregisters `key` from each of `tags`, dropping buckets that empty out.
    pub fn detach<'a>(&mut self, key: &str, tags: impl IntoIterator<Item = &'a String>) {
        for tag in tags {
            if let Some(keys) = self.buckets.get_mut(tag.as_str()) {
                keys.remove(key);
                if keys.is_empty() {
                    self.buckets.remove(tag.as_str());
                }
            }
        }
    }

    /// Moves `key` from the `old` tag set to the `new` one, touching only the
    /// buckets that actually change.
    pub fn retag(&mut self, key: &str, old: &HashSet<String>, new: &HashSet<String>) {
        self.detach(key, old.difference(new));
        self.attach(key, new.difference(old));
    }

    /// Removes the bucket for `tag` and returns its keys.
    pub fn take(&mut self, tag: &str) -> HashSet<String> {
        self.buckets.remove(tag).unwrap_or_default()
    }

    /// Keys currently under `tag`.
    pub fn keys(&self, tag: &str) -> Option<&HashSet<String>> {
        self.buckets.get(tag)
    }

    /// Returns true if `key` is filed under `tag`.
    pub fn contains(&self, tag: &str, key: &str) -> bool {
        self.buckets
            .get(tag)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Iterates over every (tag, keys) bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.buckets.iter().map(|(tag, keys)| (tag.as_str(), keys))
    }

    /// Drops every tag and its key set.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}
