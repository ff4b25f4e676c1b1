mod common;

use common::{ids, memory_store, upsert_one};
use ragpipe::application::retriever::Retriever;
use ragpipe::domain::error::DomainError;

fn seeded() -> Retriever {
    let store = memory_store();
    upsert_one(&store, "d1", vec![1.0, 0.0], "one");
    upsert_one(&store, "d2", vec![0.0, 1.0], "two");
    upsert_one(&store, "d3", vec![1.0, 1.0], "three");
    Retriever::new(store, 2)
}

#[test]
fn test_default_k_applies_when_omitted() {
    let retriever = seeded();
    let results = retriever.retrieve(&[1.0, 0.0], None).unwrap();
    assert_eq!(ids(&results), vec!["d1", "d3"]);
}

#[test]
fn test_explicit_k_overrides_default() {
    let retriever = seeded();
    assert_eq!(retriever.retrieve(&[1.0, 0.0], Some(1)).unwrap().len(), 1);
    assert_eq!(retriever.retrieve(&[1.0, 0.0], Some(3)).unwrap().len(), 3);
}

#[test]
fn test_explicit_zero_k_rejected() {
    let retriever = seeded();
    let err = retriever.retrieve(&[1.0, 0.0], Some(0)).unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(_)));
}

#[test]
fn test_configured_zero_default_clamped_to_one() {
    let store = memory_store();
    upsert_one(&store, "a", vec![1.0], "a");
    upsert_one(&store, "b", vec![1.0], "b");
    let retriever = Retriever::new(store, 0);
    assert_eq!(retriever.default_k().value(), 1);
    assert_eq!(ids(&retriever.retrieve(&[1.0], None).unwrap()), vec!["a"]);
}

#[test]
fn test_store_errors_propagate() {
    let retriever = seeded();
    let err = retriever.retrieve(&[1.0, 0.0, 0.0], None).unwrap_err();
    assert!(matches!(err, DomainError::DimensionMismatch { .. }));
}
