//! Collection management tests

use crate::*;

#[test]
fn test_create_and_get_collection() {
    test_across_modes(|db| {
        let info = db
            .create_collection(
                "docs",
                CollectionOptions::new()
                    .dimension(4)
                    .metric(DistanceMetric::Euclidean),
            )
            .unwrap();
        assert_eq!(info.name, "docs");
        assert_eq!(info.dimension, Some(4));
        assert_eq!(info.metric, DistanceMetric::Euclidean);
        assert_eq!(info.count, 0);

        let fetched = db.get_collection("docs").unwrap();
        assert_eq!(fetched.id, info.id);
        assert_eq!(fetched.created_at, info.created_at);
    });
}

#[test]
fn test_default_metric_is_cosine() {
    let db = Quiver::ephemeral();
    let info = db.create_collection("plain", CollectionOptions::new()).unwrap();
    assert_eq!(info.metric, DistanceMetric::Cosine);
    assert_eq!(info.dimension, None);
}

#[test]
fn test_create_duplicate_fails() {
    test_across_modes(|db| {
        create(&db, "dup", 3, DistanceMetric::Cosine);
        let err = db
            .create_collection("dup", CollectionOptions::new().dimension(3))
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    });
}

#[test]
fn test_get_or_create_returns_existing() {
    test_across_modes(|db| {
        let first = db
            .get_or_create_collection("shared", CollectionOptions::new().dimension(3))
            .unwrap();
        // Differing options do not matter once the collection exists.
        let second = db
            .get_or_create_collection(
                "shared",
                CollectionOptions::new()
                    .dimension(8)
                    .metric(DistanceMetric::DotProduct),
            )
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.dimension, Some(3));
        assert_eq!(db.list_collections().unwrap().len(), 1);
    });
}

#[test]
fn test_delete_collection() {
    test_across_modes(|db| {
        create(&db, "gone", 2, DistanceMetric::Cosine);
        db.upsert("gone", vec![Record::new("a", vec![1.0, 0.0])])
            .unwrap();

        db.delete_collection("gone").unwrap();
        assert!(!db.collection_exists("gone").unwrap());
        assert!(matches!(
            db.get_collection("gone").unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            db.delete_collection("gone").unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(!db.delete_collection_if_exists("gone").unwrap());
    });
}

#[test]
fn test_recreate_after_delete_starts_empty() {
    test_across_modes(|db| {
        create(&db, "again", 2, DistanceMetric::Cosine);
        let old = db.get_collection("again").unwrap();
        db.upsert("again", vec![Record::new("a", vec![1.0, 0.0])])
            .unwrap();
        db.delete_collection("again").unwrap();

        let new = db
            .create_collection("again", CollectionOptions::new().dimension(5))
            .unwrap();
        assert_ne!(new.id, old.id);
        assert_eq!(new.dimension, Some(5));
        assert_eq!(db.count("again").unwrap(), 0);
    });
}

#[test]
fn test_list_in_creation_order() {
    test_across_modes(|db| {
        for name in ["zeta", "alpha", "mid"] {
            create(&db, name, 2, DistanceMetric::Cosine);
        }
        assert_eq!(
            db.list_collection_names().unwrap(),
            vec!["zeta", "alpha", "mid"]
        );

        db.delete_collection("alpha").unwrap();
        assert_eq!(db.list_collection_names().unwrap(), vec!["zeta", "mid"]);
    });
}

#[test]
fn test_collection_metadata_roundtrip() {
    let db = Quiver::ephemeral();
    let info = db
        .create_collection(
            "tagged",
            CollectionOptions::new()
                .dimension(2)
                .metadata(meta([("owner", "ops".into()), ("tier", 2i64.into())])),
        )
        .unwrap();
    let metadata = info.metadata.unwrap();
    assert_eq!(metadata.get("owner"), Some(&MetadataValue::from("ops")));
    assert_eq!(metadata.get("tier"), Some(&MetadataValue::from(2i64)));
}

#[test]
fn test_info_counts_collections() {
    let db = Quiver::ephemeral();
    create(&db, "a1", 2, DistanceMetric::Cosine);
    create(&db, "b1", 2, DistanceMetric::Cosine);
    let info = db.info().unwrap();
    assert_eq!(info.collections, 2);
    assert!(!info.durable);
    assert_eq!(info.version, db.version().unwrap());
}
