use crate::domain::entities::indexed_record::IndexedRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{validate_batch, validate_query, VectorStore};
use crate::domain::values::retrieval::{RetrievalResult, RetrievedDocument};
use crate::domain::values::similarity::{cosine_similarity, rank};
use crate::domain::values::top_k::TopK;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

struct Slot {
    seq: u64,
    vector: Vec<f32>,
    metadata: BTreeMap<String, String>,
}

#[derive(Default)]
struct IndexState {
    records: HashMap<String, Slot>,
    next_seq: u64,
    dimension: Option<usize>,
}

/// Process-scoped vector store with brute-force cosine search.
///
/// Queries share a read lock; each upsert batch is applied under a single
/// write lock, so readers observe either the whole batch or none of it.
#[derive(Default)]
pub struct InMemoryVectorStore {
    state: RwLock<IndexState>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexState>, DomainError> {
        self.state.read().map_err(DomainError::database)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexState>, DomainError> {
        self.state.write().map_err(DomainError::database)
    }
}

impl VectorStore for InMemoryVectorStore {
    fn upsert(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        metadatas: &[BTreeMap<String, String>],
    ) -> Result<(), DomainError> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        state.dimension = validate_batch(state.dimension, ids, vectors, metadatas)?;

        for ((id, vector), metadata) in ids.iter().zip(vectors).zip(metadatas) {
            match state.records.get_mut(id) {
                Some(slot) => {
                    slot.vector = vector.clone();
                    slot.metadata = metadata.clone();
                }
                None => {
                    state.records.insert(
                        id.clone(),
                        Slot {
                            seq: state.next_seq,
                            vector: vector.clone(),
                            metadata: metadata.clone(),
                        },
                    );
                    state.next_seq += 1;
                }
            }
        }
        debug!(count = ids.len(), total = state.records.len(), "upserted batch");
        Ok(())
    }

    fn query(&self, vector: &[f32], k: TopK) -> Result<RetrievalResult, DomainError> {
        let state = self.read()?;
        if state.records.is_empty() {
            return Ok(Vec::new());
        }
        validate_query(state.dimension, vector)?;

        let hits: Vec<(u64, f64, (&String, &Slot))> = state
            .records
            .iter()
            .map(|(id, slot)| (slot.seq, cosine_similarity(vector, &slot.vector), (id, slot)))
            .collect();

        Ok(rank(hits, k.value())
            .into_iter()
            .map(|(_, score, (id, slot))| RetrievedDocument {
                id: id.clone(),
                metadata: slot.metadata.clone(),
                score,
            })
            .collect())
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut state = self.write()?;
        if state.records.remove(id).is_some() {
            debug!(id, "deleted record");
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<IndexedRecord, DomainError> {
        let state = self.read()?;
        state
            .records
            .get(id)
            .map(|slot| IndexedRecord {
                id: id.to_string(),
                vector: slot.vector.clone(),
                metadata: slot.metadata.clone(),
            })
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.records.len())
    }

    fn dimension(&self) -> Result<Option<usize>, DomainError> {
        Ok(self.read()?.dimension)
    }
}
