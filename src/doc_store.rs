use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DATABASE_NAME: &str = "FIFA_DB";

/// Schema-flexible document sink: JSON bodies grouped into named collections.
///
/// Uniqueness is never enforced; inserting the same document twice stores it
/// twice.
pub struct DocumentStore {
    conn: Connection,
    location: Option<PathBuf>,
}

impl DocumentStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)
            .with_context(|| format!("open document store {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self {
            conn,
            location: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory document store")?;
        init_schema(&conn)?;
        Ok(Self {
            conn,
            location: None,
        })
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn delete_all(&mut self, collection: &str) -> Result<usize> {
        self.conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1",
                params![collection],
            )
            .with_context(|| format!("clear collection {collection}"))
    }

    /// Inserts every document in one transaction. An empty batch is a no-op.
    pub fn insert_many<T: Serialize>(&mut self, collection: &str, docs: &[T]) -> Result<usize> {
        if docs.is_empty() {
            return Ok(0);
        }
        let inserted_at = Utc::now().to_rfc3339();
        let tx = self
            .conn
            .transaction()
            .context("begin insert_many transaction")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO documents(collection, body, inserted_at) VALUES (?1, ?2, ?3)",
                )
                .context("prepare document insert")?;
            for doc in docs {
                let body = serde_json::to_string(doc).context("serialize document")?;
                stmt.execute(params![collection, body, inserted_at])
                    .with_context(|| format!("insert into {collection}"))?;
            }
        }
        tx.commit().context("commit insert_many transaction")?;
        Ok(docs.len())
    }

    pub fn insert_one<T: Serialize>(&mut self, collection: &str, doc: &T) -> Result<()> {
        let body = serde_json::to_string(doc).context("serialize document")?;
        self.conn
            .execute(
                "INSERT INTO documents(collection, body, inserted_at) VALUES (?1, ?2, ?3)",
                params![collection, body, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("insert into {collection}"))?;
        Ok(())
    }

    pub fn count(&self, collection: &str) -> Result<usize> {
        let n = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                params![collection],
                |row| row.get::<_, i64>(0),
            )
            .with_context(|| format!("count {collection}"))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// All documents of a collection in insertion order.
    pub fn find_all<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY doc_id ASC")
            .context("prepare find_all query")?;
        let rows = stmt
            .query_map(params![collection], |row| row.get::<_, String>(0))
            .with_context(|| format!("query {collection}"))?;

        let mut out = Vec::new();
        for row in rows {
            let body = row.context("decode document row")?;
            let doc = serde_json::from_str::<T>(&body)
                .with_context(|| format!("decode {collection} document"))?;
            out.push(doc);
        }
        Ok(out)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            doc_id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            body TEXT NOT NULL,
            inserted_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
        "#,
    )
    .context("create document store schema")?;
    Ok(())
}
