//! Query handler collaborators.
//!
//! Each handler serves one query kind against its own read-only SQLite database
//! under `<asset_dir>/data/`. Databases are opened lazily on first query; a
//! missing or unreadable database surfaces as a handler error, which the
//! dispatcher turns into an error response without touching the server.

pub mod dict;
pub mod fts;

pub use dict::DictHandler;
pub use fts::FtsHandler;

use std::path::Path;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Open a bundled database read-only.
pub(crate) async fn open_db(db_path: &Path) -> anyhow::Result<Pool<Sqlite>> {
    let db_url = format!("sqlite:{}?mode=ro", db_path.to_string_lossy());
    let db = SqlitePoolOptions::new()
        .max_connections(2)
        .connect(&db_url)
        .await
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    tracing::info!("opened database {}", db_path.display());
    Ok(db)
}
