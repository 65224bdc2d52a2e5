//! Durability tests
//!
//! Data written through a WAL-backed database must be visible after the
//! database is dropped and reopened on the same directory.

use crate::*;
use std::io::Write;

#[test]
fn test_records_persist_after_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "persist", 3, DistanceMetric::Cosine);
        db.upsert(
            "persist",
            vec![
                Record::new("v1", vec![1.0, 2.0, 3.0])
                    .with_metadata(meta([("tag", "one".into())]))
                    .with_document("doc one"),
                Record::new("v2", vec![4.0, 5.0, 6.0]),
            ],
        )
        .unwrap();
    }

    {
        let db = create_persistent_db(temp_dir.path());
        assert!(db.info().unwrap().durable);
        assert_eq!(db.count("persist").unwrap(), 2);

        let records = db.get_records("persist", &["v1", "v2"]).unwrap();
        assert_eq!(records[0].vector, vec![1.0, 2.0, 3.0]);
        assert_eq!(records[0].document.as_deref(), Some("doc one"));
        assert_eq!(
            records[0].metadata.as_ref().and_then(|m| m.get("tag")),
            Some(&MetadataValue::from("one"))
        );
        assert_eq!(records[1].vector, vec![4.0, 5.0, 6.0]);
    }
}

#[test]
fn test_collection_settings_persist() {
    let temp_dir = TempDir::new().unwrap();

    let before = {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "first", 8, DistanceMetric::DotProduct);
        db.create_collection("lazy", CollectionOptions::new()).unwrap();
        db.upsert("lazy", vec![Record::new("a", vec![1.0, 2.0])])
            .unwrap();
        db.list_collections().unwrap()
    };

    let db = create_persistent_db(temp_dir.path());
    let after = db.list_collections().unwrap();
    assert_eq!(before, after);
    assert_eq!(after[0].metric, DistanceMetric::DotProduct);
    // A dimension fixed by the first insert survives the restart.
    assert_eq!(after[1].dimension, Some(2));
    assert!(matches!(
        db.upsert("lazy", vec![Record::new("b", vec![1.0])]),
        Err(Error::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_deletes_persist() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "keep", 2, DistanceMetric::Cosine);
        create(&db, "drop", 2, DistanceMetric::Cosine);
        db.upsert(
            "keep",
            vec![
                Record::new("a", vec![1.0, 0.0]),
                Record::new("b", vec![0.0, 1.0]),
            ],
        )
        .unwrap();
        db.delete_records("keep", &["a"]).unwrap();
        db.delete_collection("drop").unwrap();
    }

    let db = create_persistent_db(temp_dir.path());
    assert_eq!(db.list_collection_names().unwrap(), vec!["keep"]);
    assert_eq!(db.count("keep").unwrap(), 1);
    assert!(db.get_records("keep", &["a"]).unwrap().is_empty());
}

#[test]
fn test_recreated_collection_replays_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "cycle", 2, DistanceMetric::Cosine);
        db.upsert("cycle", vec![Record::new("old", vec![1.0, 0.0])])
            .unwrap();
        db.delete_collection("cycle").unwrap();
        create(&db, "cycle", 3, DistanceMetric::Euclidean);
        db.upsert("cycle", vec![Record::new("new", vec![1.0, 0.0, 0.0])])
            .unwrap();
    }

    let db = create_persistent_db(temp_dir.path());
    let info = db.get_collection("cycle").unwrap();
    assert_eq!(info.dimension, Some(3));
    assert_eq!(info.metric, DistanceMetric::Euclidean);
    assert_eq!(info.count, 1);
    assert!(db.get_records("cycle", &["old"]).unwrap().is_empty());
}

#[test]
fn test_torn_wal_tail_is_dropped() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "torn", 2, DistanceMetric::Cosine);
        db.upsert("torn", vec![Record::new("a", vec![1.0, 0.0])])
            .unwrap();
    }

    // Simulate a crash mid-append.
    let wal_path = temp_dir.path().join(quiver::durability::WAL_FILE_NAME);
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&wal_path)
        .unwrap();
    file.write_all(&[0xFF, 0x00, 0x00, 0x00, 0xAB]).unwrap();
    drop(file);

    {
        let db = create_persistent_db(temp_dir.path());
        assert_eq!(db.count("torn").unwrap(), 1);
        db.upsert("torn", vec![Record::new("b", vec![0.0, 1.0])])
            .unwrap();
    }

    let db = create_persistent_db(temp_dir.path());
    assert_eq!(db.count("torn").unwrap(), 2);
}

#[test]
fn test_no_durability_mode_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = Quiver::open(
            DatabaseOptions::new()
                .data_dir(temp_dir.path())
                .durability(DurabilityMode::None),
        )
        .unwrap();
        create(&db, "volatile", 2, DistanceMetric::Cosine);
        assert!(!db.info().unwrap().durable);
    }

    let db = create_persistent_db(temp_dir.path());
    assert!(!db.collection_exists("volatile").unwrap());
}

#[test]
fn test_batched_mode_persists_after_flush() {
    let temp_dir = TempDir::new().unwrap();

    {
        let db = Quiver::open(
            DatabaseOptions::new()
                .data_dir(temp_dir.path())
                .durability(DurabilityMode::Batched {
                    interval_ms: 60_000,
                    batch_size: 10_000,
                }),
        )
        .unwrap();
        create(&db, "batched", 2, DistanceMetric::Cosine);
        db.upsert("batched", vec![Record::new("a", vec![1.0, 0.0])])
            .unwrap();
        db.flush().unwrap();
    }

    let db = create_persistent_db(temp_dir.path());
    assert_eq!(db.count("batched").unwrap(), 1);
}
