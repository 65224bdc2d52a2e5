//! Validation and boundary conditions

use crate::*;

fn is_invalid<T: std::fmt::Debug>(result: Result<T>) -> bool {
    matches!(result, Err(Error::InvalidArgument(_)))
}

#[test]
fn test_invalid_collection_names() {
    let db = Quiver::ephemeral();
    for name in ["", "-lead", "trail_", "has space", "a..b", "slash/name"] {
        assert!(
            is_invalid(db.create_collection(name, CollectionOptions::new())),
            "name {:?} should be rejected",
            name
        );
    }
    let too_long = "a".repeat(129);
    assert!(is_invalid(db.create_collection(&too_long, CollectionOptions::new())));
    assert!(db.create_collection("ok.name-1_x", CollectionOptions::new()).is_ok());
}

#[test]
fn test_zero_dimension_rejected() {
    let db = Quiver::ephemeral();
    assert!(is_invalid(
        db.create_collection("zero", CollectionOptions::new().dimension(0))
    ));
}

#[test]
fn test_invalid_vectors_rejected() {
    let db = Quiver::ephemeral();
    create(&db, "vecs", 2, DistanceMetric::Cosine);
    assert!(is_invalid(db.upsert("vecs", vec![Record::new("e", vec![])])));
    assert!(is_invalid(
        db.upsert("vecs", vec![Record::new("n", vec![f32::NAN, 1.0])])
    ));
    assert!(is_invalid(
        db.upsert("vecs", vec![Record::new("i", vec![f32::INFINITY, 1.0])])
    ));
    assert!(is_invalid(db.upsert("vecs", vec![])));
    assert_eq!(db.count("vecs").unwrap(), 0);
}

#[test]
fn test_query_validation() {
    let db = Quiver::ephemeral();
    create(&db, "q", 2, DistanceMetric::Cosine);
    db.upsert("q", vec![Record::new("a", vec![1.0, 0.0])])
        .unwrap();

    assert!(is_invalid(db.query("q", vec![vec![1.0, 0.0]], 0, None)));
    assert!(is_invalid(db.query("q", vec![], 1, None)));
    assert!(is_invalid(db.query("q", vec![vec![]], 1, None)));
    assert_eq!(
        db.query("q", vec![vec![1.0, 0.0, 0.0]], 1, None)
            .unwrap_err(),
        Error::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn test_first_insert_fixes_dimension() {
    let db = Quiver::ephemeral();
    db.create_collection("lazy", CollectionOptions::new()).unwrap();
    assert_eq!(db.get_collection("lazy").unwrap().dimension, None);

    db.upsert("lazy", vec![Record::new("a", vec![1.0, 2.0, 3.0])])
        .unwrap();
    assert_eq!(db.get_collection("lazy").unwrap().dimension, Some(3));
    assert!(matches!(
        db.upsert("lazy", vec![Record::new("b", vec![1.0, 2.0])]),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn test_mixed_dimensions_in_first_batch_rejected() {
    let db = Quiver::ephemeral();
    db.create_collection("lazy", CollectionOptions::new()).unwrap();
    let err = db
        .upsert(
            "lazy",
            vec![
                Record::new("a", vec![1.0, 2.0]),
                Record::new("b", vec![1.0, 2.0, 3.0]),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
    assert_eq!(db.get_collection("lazy").unwrap().dimension, None);
}

#[test]
fn test_zero_vector_cosine_scores_zero() {
    let db = Quiver::ephemeral();
    create(&db, "zeros", 2, DistanceMetric::Cosine);
    db.upsert("zeros", vec![Record::new("z", vec![0.0, 0.0])])
        .unwrap();
    let hits = &db.query("zeros", vec![vec![1.0, 0.0]], 1, None).unwrap()[0];
    assert_eq!(hits[0].score, 0.0);
}

#[test]
fn test_delete_all_then_query() {
    let db = Quiver::ephemeral();
    create(&db, "empty", 2, DistanceMetric::Cosine);
    db.upsert("empty", vec![Record::new("a", vec![1.0, 0.0])])
        .unwrap();
    db.delete_records("empty", &["a"]).unwrap();

    let hits = &db.query("empty", vec![vec![1.0, 0.0]], 3, None).unwrap()[0];
    assert!(hits.is_empty());
    // The dimension stays fixed after the last record is gone.
    assert_eq!(db.get_collection("empty").unwrap().dimension, Some(2));
}

#[test]
fn test_heartbeat_never_decreases() {
    let db = Quiver::ephemeral();
    let first = db.heartbeat().unwrap();
    let second = db.heartbeat().unwrap();
    assert!(second >= first);
}
