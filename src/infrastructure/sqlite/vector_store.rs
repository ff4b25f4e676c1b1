use crate::domain::entities::indexed_record::IndexedRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{validate_batch, validate_query, VectorStore};
use crate::domain::values::retrieval::{RetrievalResult, RetrievedDocument};
use crate::domain::values::similarity::{cosine_similarity, rank};
use crate::domain::values::top_k::TopK;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const DIMENSION_KEY: &str = "dimension";

/// Durable vector store on SQLite. Each upsert batch is one transaction;
/// `seq` records insertion order and survives replacement.
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    pub fn new(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens (or creates) the database at `path` in WAL mode.
    pub fn open(path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL").map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        Self::new(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn.lock().map_err(DomainError::database)
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn serialize_metadata(metadata: &BTreeMap<String, String>) -> Result<String, DomainError> {
        serde_json::to_string(metadata).map_err(|e| DomainError::Parse(format!("metadata: {e}")))
    }

    fn deserialize_metadata(text: &str) -> Result<BTreeMap<String, String>, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::Parse(format!("metadata: {e}")))
    }

    fn stored_dimension(conn: &Connection) -> Result<Option<usize>, DomainError> {
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM store_meta WHERE key = ?1",
                params![DIMENSION_KEY],
                |r| r.get(0),
            )
            .optional()?;
        value
            .map(|v| v.parse::<usize>().map_err(|e| DomainError::Parse(format!("stored dimension {v:?}: {e}"))))
            .transpose()
    }

    fn count(conn: &Connection) -> Result<usize, DomainError> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

impl VectorStore for SqliteVectorStore {
    fn upsert(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        metadatas: &[BTreeMap<String, String>],
    ) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let established = Self::stored_dimension(&conn)?;
        let dimension = validate_batch(established, ids, vectors, metadatas)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records (id, vector, metadata) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET vector = excluded.vector, metadata = excluded.metadata",
            )?;
            for ((id, vector), metadata) in ids.iter().zip(vectors).zip(metadatas) {
                stmt.execute(params![
                    id,
                    Self::serialize_vector(vector),
                    Self::serialize_metadata(metadata)?,
                ])
                .map_err(|e| DomainError::Database(format!("Failed to store record {id}: {e}")))?;
            }
        }
        if let (None, Some(dim)) = (established, dimension) {
            tx.execute(
                "INSERT OR REPLACE INTO store_meta (key, value) VALUES (?1, ?2)",
                params![DIMENSION_KEY, dim.to_string()],
            )?;
        }
        tx.commit()?;
        debug!(count = ids.len(), "upserted batch");
        Ok(())
    }

    fn query(&self, vector: &[f32], k: TopK) -> Result<RetrievalResult, DomainError> {
        let conn = self.lock()?;
        if Self::count(&conn)? == 0 {
            return Ok(Vec::new());
        }
        validate_query(Self::stored_dimension(&conn)?, vector)?;

        let mut stmt = conn.prepare("SELECT seq, id, vector, metadata FROM records ORDER BY seq")?;
        let rows = stmt.query_map([], |row| {
            let seq: i64 = row.get(0)?;
            let id: String = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            let metadata: String = row.get(3)?;
            Ok((seq, id, blob, metadata))
        })?;

        let mut hits = Vec::new();
        for row in rows {
            let (seq, id, blob, metadata) = row?;
            let stored = Self::deserialize_vector(&blob);
            let sim = cosine_similarity(vector, &stored);
            hits.push((seq as u64, sim, (id, metadata)));
        }

        rank(hits, k.value())
            .into_iter()
            .map(|(_, score, (id, metadata))| {
                Ok(RetrievedDocument {
                    id,
                    metadata: Self::deserialize_metadata(&metadata)?,
                    score,
                })
            })
            .collect()
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM records WHERE id = ?1", params![id])?;
        if removed > 0 {
            debug!(id, "deleted record");
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<IndexedRecord, DomainError> {
        let conn = self.lock()?;
        let row: Option<(Vec<u8>, String)> = conn
            .query_row(
                "SELECT vector, metadata FROM records WHERE id = ?1",
                params![id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        let (blob, metadata) = row.ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        Ok(IndexedRecord {
            id: id.to_string(),
            vector: Self::deserialize_vector(&blob),
            metadata: Self::deserialize_metadata(&metadata)?,
        })
    }

    fn len(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        Self::count(&conn)
    }

    fn dimension(&self) -> Result<Option<usize>, DomainError> {
        let conn = self.lock()?;
        Self::stored_dimension(&conn)
    }

    fn flush(&self) -> Result<(), DomainError> {
        let conn = self.lock()?;
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            .optional()
            .map_err(|e| DomainError::Database(format!("Checkpoint failed: {e}")))?;
        Ok(())
    }
}
