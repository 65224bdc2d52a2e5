//! Record operation tests

use crate::*;

#[test]
fn test_upsert_get() {
    test_across_modes(|db| {
        create(&db, "recs", 3, DistanceMetric::Cosine);
        let ids = db
            .upsert(
                "recs",
                vec![
                    Record::new("a", vec![1.0, 2.0, 3.0])
                        .with_metadata(meta([("kind", "x".into())]))
                        .with_document("first"),
                    Record::new("b", vec![4.0, 5.0, 6.0]),
                ],
            )
            .unwrap();
        assert_eq!(ids, vec!["a", "b"]);

        let records = db.get_records("recs", &["b", "missing", "a"]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
        assert_eq!(records[1].vector, vec![1.0, 2.0, 3.0]);
        assert_eq!(records[1].document.as_deref(), Some("first"));
        assert!(records[0].metadata.is_none());
    });
}

#[test]
fn test_upsert_replaces() {
    test_across_modes(|db| {
        create(&db, "recs", 2, DistanceMetric::Cosine);
        db.upsert(
            "recs",
            vec![Record::new("a", vec![1.0, 0.0]).with_document("old")],
        )
        .unwrap();
        db.upsert("recs", vec![Record::new("a", vec![0.0, 1.0])])
            .unwrap();

        assert_eq!(db.count("recs").unwrap(), 1);
        let record = &db.get_records("recs", &["a"]).unwrap()[0];
        assert_eq!(record.vector, vec![0.0, 1.0]);
        assert!(record.document.is_none());
    });
}

#[test]
fn test_generated_ids() {
    let db = Quiver::ephemeral();
    create(&db, "gen", 2, DistanceMetric::Cosine);
    let ids = db
        .upsert(
            "gen",
            vec![
                Record::new("", vec![1.0, 0.0]),
                Record::new("named", vec![0.0, 1.0]),
                Record::new("", vec![1.0, 1.0]),
            ],
        )
        .unwrap();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[1], "named");
    assert_eq!(ids[0].len(), 36);
    assert_ne!(ids[0], ids[2]);
    assert_eq!(db.count("gen").unwrap(), 3);
}

#[test]
fn test_upsert_is_all_or_nothing() {
    test_across_modes(|db| {
        create(&db, "atomic", 2, DistanceMetric::Cosine);
        let err = db
            .upsert(
                "atomic",
                vec![
                    Record::new("ok", vec![1.0, 0.0]),
                    Record::new("bad", vec![1.0, 0.0, 0.0]),
                ],
            )
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert_eq!(db.count("atomic").unwrap(), 0);
    });
}

#[test]
fn test_delete_records() {
    test_across_modes(|db| {
        create(&db, "del", 2, DistanceMetric::Cosine);
        db.upsert(
            "del",
            vec![
                Record::new("a", vec![1.0, 0.0]),
                Record::new("b", vec![0.0, 1.0]),
                Record::new("c", vec![1.0, 1.0]),
            ],
        )
        .unwrap();

        assert_eq!(db.delete_records("del", &["a", "c", "a"]).unwrap(), 2);
        assert_eq!(db.count("del").unwrap(), 1);
        assert!(db.get_records("del", &["a", "c"]).unwrap().is_empty());
    });
}

#[test]
fn test_strict_delete_of_absent_id_removes_nothing() {
    let db = Quiver::ephemeral();
    create(&db, "del", 2, DistanceMetric::Cosine);
    db.upsert("del", vec![Record::new("a", vec![1.0, 0.0])])
        .unwrap();

    let err = db.delete_records("del", &["a", "ghost"]).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(db.count("del").unwrap(), 1);
}

#[test]
fn test_lenient_delete_skips_absent_ids() {
    let db = Quiver::with_options(
        std::sync::Arc::new(Database::ephemeral()),
        quiver::ExecutorOptions {
            strict_record_delete: false,
        },
    );
    create(&db, "del", 2, DistanceMetric::Cosine);
    db.upsert("del", vec![Record::new("a", vec![1.0, 0.0])])
        .unwrap();

    assert_eq!(db.delete_records("del", &["a", "ghost"]).unwrap(), 1);
    assert_eq!(db.count("del").unwrap(), 0);
}

#[test]
fn test_record_ops_on_missing_collection() {
    let db = Quiver::ephemeral();
    let upsert = db.upsert("nope", vec![Record::new("a", vec![1.0])]);
    assert!(matches!(upsert.unwrap_err(), Error::NotFound(_)));
    assert!(matches!(db.count("nope").unwrap_err(), Error::NotFound(_)));
    assert!(matches!(
        db.get_records("nope", &["a"]).unwrap_err(),
        Error::NotFound(_)
    ));
    assert!(matches!(
        db.query("nope", vec![vec![1.0]], 1, None).unwrap_err(),
        Error::NotFound(_)
    ));
}
