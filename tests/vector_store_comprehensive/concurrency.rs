//! Concurrency tests

use crate::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_upserts_all_visible() {
    let db = Quiver::ephemeral();
    create(&db, "parallel", 3, DistanceMetric::Euclidean);

    const NUM_THREADS: usize = 8;
    const INSERTS_PER_THREAD: usize = 25;

    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..INSERTS_PER_THREAD {
                    let id = format!("t{}_{}", i, j);
                    db.upsert(
                        "parallel",
                        vec![Record::new(id, vec![i as f32, j as f32, 1.0])],
                    )
                    .unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total = NUM_THREADS * INSERTS_PER_THREAD;
    assert_eq!(db.count("parallel").unwrap(), total as u64);
    let hits = &db
        .query("parallel", vec![vec![0.0, 0.0, 1.0]], total, None)
        .unwrap()[0];
    assert_eq!(hits.len(), total);
    assert_eq!(hits[0].id, "t0_0");
}

#[test]
fn test_concurrent_reads_and_writes() {
    let db = Quiver::ephemeral();
    create(&db, "mixed", 2, DistanceMetric::Cosine);
    db.upsert("mixed", vec![Record::new("seed", vec![1.0, 0.0])])
        .unwrap();

    let barrier = Arc::new(Barrier::new(4));
    let writers: Vec<_> = (0..2)
        .map(|w| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for j in 0..50 {
                    let id = format!("w{}_{}", w, j);
                    db.upsert("mixed", vec![Record::new(id, vec![1.0, j as f32])])
                        .unwrap();
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..2)
        .map(|_| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    let hits = &db.query("mixed", vec![vec![1.0, 0.0]], 1, None).unwrap()[0];
                    assert_eq!(hits[0].id, "seed");
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(readers) {
        h.join().unwrap();
    }
    assert_eq!(db.count("mixed").unwrap(), 101);
}

#[test]
fn test_concurrent_create_same_name() {
    let db = Quiver::ephemeral();
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let db = db.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                db.create_collection("race", CollectionOptions::new().dimension(2))
                    .is_ok()
            })
        })
        .collect();

    let created = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(created, 1);
    assert_eq!(db.list_collections().unwrap().len(), 1);
}

#[test]
fn test_durable_concurrent_upserts_replay() {
    let temp_dir = TempDir::new().unwrap();
    {
        let db = create_persistent_db(temp_dir.path());
        create(&db, "wal", 2, DistanceMetric::Cosine);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let db = db.clone();
                thread::spawn(move || {
                    for j in 0..10 {
                        let id = format!("{}-{}", i, j);
                        db.upsert("wal", vec![Record::new(id, vec![1.0, 0.5])])
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    let db = create_persistent_db(temp_dir.path());
    assert_eq!(db.count("wal").unwrap(), 40);
}
