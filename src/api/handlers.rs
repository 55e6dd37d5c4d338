//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, CacheConfig};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteManyResponse, DeleteResponse, GetManyResponse, GetResponse, HasResponse,
    HealthResponse, InvalidateResponse, KeysRequest, SetManyRequest, SetManyResponse, SetRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one cache instance configured at startup. `Cache` is already a
/// shared handle, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub cache: Cache<Value>,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: Cache<Value>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState with a cache built from `config`.
    pub fn with_cache_config(config: CacheConfig) -> Self {
        Self::new(Cache::new(config))
    }

    /// Creates a new AppState from server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_cache_config(config.cache_config())
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with optional TTL and tags.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = req.options();
    state.cache.set(req.key.clone(), req.value, options).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.has(&key).await;
    Json(HasResponse { key, exists })
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(&key).await {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /mget
pub async fn get_many_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Json<GetManyResponse> {
    let entries = state.cache.get_many(req.keys.as_slice()).await;
    Json(GetManyResponse { entries })
}

/// Handler for PUT /mset
pub async fn set_many_handler(
    State(state): State<AppState>,
    Json(req): Json<SetManyRequest>,
) -> Result<Json<SetManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (entries, options) = req.into_parts();
    let count = entries.len();
    state.cache.set_many(entries, options).await;

    Ok(Json(SetManyResponse { count }))
}

/// Handler for POST /mdel
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Json<DeleteManyResponse> {
    let deleted = state.cache.delete_many(req.keys.as_slice()).await;
    Json(DeleteManyResponse { deleted })
}

/// Handler for POST /invalidate/:tag
///
/// Always succeeds, even for a tag nothing carries.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.invalidate_tag(&tag).await;
    Json(InvalidateResponse::new(tag, removed))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.clear().await;
    Json(ClearResponse {
        message: "Cache cleared".to_string(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::with_cache_config(CacheConfig::new().max_size(100).without_sweep())
    }

    fn set_request(key: &str, value: Value, tags: &[&str]) -> SetRequest {
        SetRequest {
            key: key.to_string(),
            value,
            ttl: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = set_request("test_key", json!("test_value"), &[]);
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!("test_value"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();
        let req = set_request("to_delete", json!(1), &[]);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_has_handler() {
        let state = test_state();
        let req = set_request("present", json!(true), &[]);
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = has_handler(State(state.clone()), Path("present".to_string())).await;
        assert!(response.exists);
        let response = has_handler(State(state), Path("absent".to_string())).await;
        assert!(!response.exists);
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = test_state();
        for key in ["a", "b"] {
            let req = set_request(key, json!(key), &["group"]);
            set_handler(State(state.clone()), Json(req)).await.unwrap();
        }

        let response = invalidate_handler(State(state.clone()), Path("group".to_string())).await;
        assert_eq!(response.removed, 2);

        let response = invalidate_handler(State(state), Path("group".to_string())).await;
        assert_eq!(response.removed, 0);
    }

    #[tokio::test]
    async fn test_batch_handlers() {
        let state = test_state();
        let req = SetManyRequest {
            entries: vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))],
            ttl: None,
            tags: Vec::new(),
        };
        let response = set_many_handler(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(response.count, 2);

        let keys = KeysRequest {
            keys: vec!["a".to_string(), "zzz".to_string()],
        };
        let response = get_many_handler(State(state.clone()), Json(keys.clone())).await;
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries["a"], json!(1));

        let response = delete_many_handler(State(state), Json(keys)).await;
        assert_eq!(response.deleted, 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = set_request("", json!("value"), &[]);
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
