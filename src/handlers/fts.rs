//! Full-text search handler.

use std::path::{Path, PathBuf};

use anyhow::bail;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{Pool, Sqlite};
use tokio::sync::OnceCell;

use crate::query::QueryHandler;

const MAX_MATCHES: usize = 500;

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
struct FtsRequest {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

/// Searches the bundled FTS5 corpus database
/// (`data/fts.db`, virtual table `tipitaka(filename, text)`).
pub struct FtsHandler {
    db_path: PathBuf,
    db: OnceCell<Pool<Sqlite>>,
}

impl FtsHandler {
    pub fn new(asset_dir: &Path) -> Self {
        Self {
            db_path: asset_dir.join("data").join("fts.db"),
            db: OnceCell::new(),
        }
    }

    async fn db(&self) -> anyhow::Result<&Pool<Sqlite>> {
        self.db
            .get_or_try_init(|| super::open_db(&self.db_path))
            .await
    }
}

/// Quote each term so user input is matched literally instead of being parsed
/// as FTS5 query syntax.
fn match_expression(query: &str) -> String {
    query
        .split_whitespace()
        .map(|term| format!("\"{}\"", term.replace('"', "")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl QueryHandler for FtsHandler {
    async fn run(&self, query: Value) -> anyhow::Result<Value> {
        let req: FtsRequest = serde_json::from_value(query)?;
        let expr = match_expression(&req.query);
        if expr.is_empty() {
            bail!("search query must not be empty");
        }
        let limit = req.limit.clamp(1, MAX_MATCHES);

        let db = self.db().await?;

        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT filename, snippet(tipitaka, 1, '<b>', '</b>', ' ... ', 12) \
             FROM tipitaka WHERE tipitaka MATCH ?1 ORDER BY rank LIMIT ?2",
        )
        .bind(&expr)
        .bind(limit as i64)
        .fetch_all(db)
        .await?;

        let matches: Vec<Value> = rows
            .into_iter()
            .map(|(filename, snippet)| json!({ "filename": filename, "snippet": snippet }))
            .collect();

        Ok(json!({ "query": req.query, "matches": matches }))
    }
}
