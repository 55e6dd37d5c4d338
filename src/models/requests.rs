//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::SetOptions;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds (uses default if not specified, 0 = never)
/// - `tags`: Tags to attach to the entry
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }

    /// Write options carried by this request.
    pub fn options(&self) -> SetOptions {
        SetOptions {
            ttl: self.ttl,
            tags: self.tags.clone(),
        }
    }
}

/// Request body for the batch SET operation (PUT /mset)
///
/// `entries` is a list of `[key, value]` pairs sharing one `ttl` and `tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetManyRequest {
    pub entries: Vec<(String, Value)>,
    #[serde(default)]
    pub ttl: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetManyRequest {
    pub fn validate(&self) -> Option<String> {
        if self.entries.iter().any(|(key, _)| key.is_empty()) {
            return Some("Keys cannot be empty".to_string());
        }
        None
    }

    /// Splits the request into its pairs and the shared write options.
    pub fn into_parts(self) -> (Vec<(String, Value)>, SetOptions) {
        let options = SetOptions {
            ttl: self.ttl,
            tags: self.tags,
        };
        (self.entries, options)
    }
}

/// Request body listing keys (POST /mget, POST /mdel)
#[derive(Debug, Clone, Deserialize)]
pub struct KeysRequest {
    pub keys: Vec<String>,
}
