use crate::domain::entities::indexed_record::IndexedRecord;
use crate::domain::error::{DomainError, QUERY_ID};
use crate::domain::values::retrieval::RetrievalResult;
use crate::domain::values::top_k::TopK;
use std::collections::BTreeMap;

/// Associative index from document id to `(vector, metadata)` with exact
/// nearest-neighbour search.
///
/// Contract shared by every backend:
/// - all stored vectors have the dimension fixed by the first-ever insert;
/// - `upsert` validates the whole batch before writing and applies it
///   atomically, fully replacing records whose id already exists;
/// - `query` ranks by cosine similarity, descending, ties by ascending
///   insertion order, and returns an empty result on an empty store;
/// - `delete` of an absent id is a no-op.
pub trait VectorStore: Send + Sync {
    fn upsert(
        &self,
        ids: &[String],
        vectors: &[Vec<f32>],
        metadatas: &[BTreeMap<String, String>],
    ) -> Result<(), DomainError>;

    fn query(&self, vector: &[f32], k: TopK) -> Result<RetrievalResult, DomainError>;

    fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// Fails with `NotFound` when `id` is absent.
    fn get(&self, id: &str) -> Result<IndexedRecord, DomainError>;

    fn len(&self) -> Result<usize, DomainError>;

    fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    /// Established vector dimension, `None` before the first insert.
    fn dimension(&self) -> Result<Option<usize>, DomainError>;

    /// Makes pending writes durable. Called on teardown.
    fn flush(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Rejects vectors with NaN or infinite components.
pub(crate) fn ensure_finite(id: &str, vector: &[f32]) -> Result<(), DomainError> {
    match vector.iter().position(|x| !x.is_finite()) {
        Some(pos) => Err(DomainError::InvalidArgument(format!(
            "vector for {id} has non-finite component {} at index {pos}",
            vector[pos]
        ))),
        None => Ok(()),
    }
}

/// Checks a query vector against the store's established dimension.
pub(crate) fn validate_query(established: Option<usize>, vector: &[f32]) -> Result<(), DomainError> {
    if let Some(expected) = established {
        if expected != vector.len() {
            return Err(DomainError::DimensionMismatch {
                id: QUERY_ID.to_string(),
                expected,
                actual: vector.len(),
            });
        }
    }
    ensure_finite(QUERY_ID, vector)
}

/// Checks batch shape, dimensions and component values before any write.
///
/// Returns the dimension the batch establishes (or confirms).
pub(crate) fn validate_batch(
    established: Option<usize>,
    ids: &[String],
    vectors: &[Vec<f32>],
    metadatas: &[BTreeMap<String, String>],
) -> Result<Option<usize>, DomainError> {
    if ids.len() != vectors.len() || ids.len() != metadatas.len() {
        return Err(DomainError::InvalidArgument(format!(
            "upsert batch lengths differ: {} ids, {} vectors, {} metadatas",
            ids.len(),
            vectors.len(),
            metadatas.len()
        )));
    }
    let mut dimension = established;
    for (id, vector) in ids.iter().zip(vectors) {
        ensure_finite(id, vector)?;
        match dimension {
            Some(expected) if expected != vector.len() => {
                return Err(DomainError::DimensionMismatch {
                    id: id.clone(),
                    expected,
                    actual: vector.len(),
                });
            }
            Some(_) => {}
            None => dimension = Some(vector.len()),
        }
    }
    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{i}")).collect()
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let err = validate_batch(None, &ids(2), &[vec![1.0]], &[BTreeMap::new(), BTreeMap::new()]);
        assert!(matches!(err, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_first_vector_establishes_dimension() {
        let dim = validate_batch(None, &ids(1), &[vec![1.0, 2.0]], &[BTreeMap::new()]).unwrap();
        assert_eq!(dim, Some(2));
    }

    #[test]
    fn test_mixed_batch_names_offending_id() {
        let err = validate_batch(
            None,
            &ids(2),
            &[vec![1.0, 2.0], vec![1.0]],
            &[BTreeMap::new(), BTreeMap::new()],
        )
        .unwrap_err();
        match err {
            DomainError::DimensionMismatch { id, expected, actual } => {
                assert_eq!(id, "d1");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_component_names_id() {
        let err = validate_batch(
            None,
            &ids(2),
            &[vec![1.0, 0.0], vec![f32::NAN, 1.0]],
            &[BTreeMap::new(), BTreeMap::new()],
        )
        .unwrap_err();
        match err {
            DomainError::InvalidArgument(msg) => assert!(msg.contains("d1"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_checks_dimension_before_values() {
        assert!(matches!(
            validate_query(Some(2), &[f32::INFINITY]),
            Err(DomainError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            validate_query(Some(2), &[f32::INFINITY, 0.0]),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(validate_query(None, &[1.0]).is_ok());
    }

    #[test]
    fn test_empty_batch_keeps_dimension() {
        assert_eq!(validate_batch(Some(3), &[], &[], &[]).unwrap(), Some(3));
        assert_eq!(validate_batch(None, &[], &[], &[]).unwrap(), None);
    }
}
