//! Dictionary lookup handler.

use std::path::{Path, PathBuf};

use anyhow::bail;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{Pool, Sqlite};
use tokio::sync::OnceCell;

use crate::query::QueryHandler;

/// Upper bound on prefix-match rows returned for a single lookup.
const MAX_ENTRIES: i64 = 100;

#[derive(Debug, Deserialize)]
struct DictRequest {
    term: String,
}

/// Looks up a Pali term in the bundled dictionary database
/// (`data/dict.db`, table `dictionary(word, dict_name, meaning)`).
pub struct DictHandler {
    db_path: PathBuf,
    db: OnceCell<Pool<Sqlite>>,
}

impl DictHandler {
    pub fn new(asset_dir: &Path) -> Self {
        Self {
            db_path: asset_dir.join("data").join("dict.db"),
            db: OnceCell::new(),
        }
    }

    async fn db(&self) -> anyhow::Result<&Pool<Sqlite>> {
        self.db
            .get_or_try_init(|| super::open_db(&self.db_path))
            .await
    }
}

#[async_trait]
impl QueryHandler for DictHandler {
    async fn run(&self, query: Value) -> anyhow::Result<Value> {
        let req: DictRequest = serde_json::from_value(query)?;
        let term = req.term.trim().to_lowercase();
        if term.is_empty() {
            bail!("dictionary term must not be empty");
        }

        let db = self.db().await?;

        let mut rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT word, dict_name, meaning FROM dictionary WHERE word = ?1 ORDER BY dict_name",
        )
        .bind(&term)
        .fetch_all(db)
        .await?;

        // No exact hit, fall back to a prefix match so near-misses still help.
        if rows.is_empty() {
            rows = sqlx::query_as(
                "SELECT word, dict_name, meaning FROM dictionary \
                 WHERE word LIKE ?1 || '%' ORDER BY word, dict_name LIMIT ?2",
            )
            .bind(&term)
            .bind(MAX_ENTRIES)
            .fetch_all(db)
            .await?;
        }

        let entries: Vec<Value> = rows
            .into_iter()
            .map(|(word, dict, meaning)| json!({ "word": word, "dict": dict, "meaning": meaning }))
            .collect();

        Ok(json!({ "term": term, "entries": entries }))
    }
}
