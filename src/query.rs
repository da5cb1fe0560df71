//! Query dispatch layer.
//!
//! The front-end posts a JSON body with a `type` discriminator; the dispatcher
//! routes it to the matching handler and normalizes every outcome (handler
//! success, handler failure, malformed input) into a single response envelope.
//! Errors never escape this boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

/// The closed set of query discriminators the front-end may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Full-text search over the Tipitaka corpus.
    Fts,
    /// Dictionary lookup.
    Dict,
}

impl QueryKind {
    /// Read the `type` field of a parsed query. The unrecognized value is carried
    /// in the error so the response can name it.
    fn of(query: &Value) -> Result<Self, DispatchError> {
        match query.get("type") {
            Some(Value::String(tag)) => match tag.as_str() {
                "fts" => Ok(QueryKind::Fts),
                "dict" => Ok(QueryKind::Dict),
                other => Err(DispatchError::UnhandledType(other.to_string())),
            },
            Some(other) => Err(DispatchError::UnhandledType(other.to_string())),
            None => Err(DispatchError::UnhandledType("null".to_string())),
        }
    }
}

/// A domain query collaborator. Opaque to the dispatcher beyond this contract:
/// one asynchronous run per query, success payload returned verbatim.
#[async_trait]
pub trait QueryHandler: Send + Sync {
    async fn run(&self, query: Value) -> anyhow::Result<Value>;
}

/// Dispatch-level failure. The machine-readable kind is kept internally; only the
/// message string crosses the wire as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unhandled query type {0}")]
    UnhandledType(String),
    #[error("{0}")]
    Handler(anyhow::Error),
}

/// Routes parsed queries to their handlers. One handler per kind, fixed at
/// startup; adding a kind is a compile-checked change here and in [`QueryKind`].
pub struct QueryDispatcher {
    fts: Arc<dyn QueryHandler>,
    dict: Arc<dyn QueryHandler>,
}

impl QueryDispatcher {
    pub fn new(fts: Arc<dyn QueryHandler>, dict: Arc<dyn QueryHandler>) -> Self {
        Self { fts, dict }
    }

    /// Dispatch a raw request body. Always produces exactly one response value:
    /// the handler's output on success, `{"error": message}` on any failure.
    pub async fn dispatch(&self, raw_body: &str) -> Value {
        match self.try_dispatch(raw_body).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("sending error response: {}", err);
                json!({ "error": err.to_string() })
            }
        }
    }

    async fn try_dispatch(&self, raw_body: &str) -> Result<Value, DispatchError> {
        let query: Value = serde_json::from_str(raw_body)?;
        let handler = match QueryKind::of(&query)? {
            QueryKind::Fts => &self.fts,
            QueryKind::Dict => &self.dict,
        };
        handler.run(query).await.map_err(DispatchError::Handler)
    }
}
