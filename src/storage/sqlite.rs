//! SQLite storage backend: all documents in a single table.

use crate::storage::{validate_name, Document, Storage, StorageError, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    name       TEXT PRIMARY KEY,
    updated_at TEXT NOT NULL,
    body       TEXT NOT NULL
);
";

/// Stores documents in a `documents(name, updated_at, body)` table.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database file and ensures the schema exists.
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn save_or_create(&mut self, name: &str, data: &Document) -> StorageResult<()> {
        validate_name(name)?;

        let body = serde_json::to_string(data)?;
        self.conn.execute(
            "INSERT INTO documents (name, updated_at, body) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET updated_at = ?2, body = ?3",
            params![name, Utc::now().to_rfc3339(), body],
        )?;
        Ok(())
    }

    fn get(&self, name: &str) -> StorageResult<Document> {
        validate_name(name)?;

        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => Ok(serde_json::from_str(&body)?),
            None => Err(StorageError::DocumentNotFound(name.to_string())),
        }
    }

    fn has(&self, name: &str) -> bool {
        if validate_name(name).is_err() {
            return false;
        }

        self.conn
            .query_row(
                "SELECT 1 FROM documents WHERE name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .unwrap_or(false)
    }
}
