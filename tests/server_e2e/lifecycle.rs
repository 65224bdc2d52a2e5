//! Durable restarts and concurrent sessions

use crate::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_durable_server_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let config = ServerConfig {
        bind: "127.0.0.1:0".into(),
        data_dir: Some(temp_dir.path().to_path_buf()),
        durability: DurabilityMode::Strict,
        ..ServerConfig::default()
    };

    {
        let server = TestServer::start_config(&config).await;
        let mut session = server.connect().await;
        assert!(session.info().await.unwrap().durable);
        session
            .create_collection("kept", CollectionOptions::new().dimension(2))
            .await
            .unwrap();
        session
            .upsert("kept", vec![Record::new("a", vec![0.6, 0.8])])
            .await
            .unwrap();
        session.close().await.unwrap();
        server.stop().await;
    }

    let server = TestServer::start_config(&config).await;
    let mut session = server.connect().await;
    assert_eq!(session.count("kept").await.unwrap(), 1);
    let hits = session
        .query("kept", vec![vec![0.6, 0.8]], 1, None)
        .await
        .unwrap();
    assert_eq!(hits[0][0].id, "a");
    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_sessions() {
    let server = TestServer::start().await;
    {
        let mut session = server.connect().await;
        session
            .create_collection("busy", CollectionOptions::new().dimension(2))
            .await
            .unwrap();
    }

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let config = server.client_config();
            tokio::spawn(async move {
                let mut session = Session::connect(config).await.unwrap();
                for j in 0..10 {
                    session
                        .upsert(
                            "busy",
                            vec![Record::new(format!("{}-{}", i, j), vec![1.0, j as f32])],
                        )
                        .await
                        .unwrap();
                }
                session.close().await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let mut session = server.connect().await;
    assert_eq!(session.count("busy").await.unwrap(), 80);
    server.stop().await;
}

#[tokio::test]
async fn test_lenient_delete_config() {
    let config = ServerConfig {
        bind: "127.0.0.1:0".into(),
        strict_record_delete: false,
        ..ServerConfig::default()
    };
    let server = TestServer::start_config(&config).await;
    let mut session = server.connect().await;
    session
        .create_collection("soft", CollectionOptions::new().dimension(1))
        .await
        .unwrap();
    session
        .upsert("soft", vec![Record::new("a", vec![1.0])])
        .await
        .unwrap();
    assert_eq!(
        session.delete_records("soft", &["a", "ghost"]).await.unwrap(),
        1
    );
    server.stop().await;
}

#[tokio::test]
async fn test_dropped_query_releases_collection() {
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    let config = ServerConfig {
        bind: "127.0.0.1:0".into(),
        lock_timeout_ms: 2000,
        ..ServerConfig::default()
    };
    let server = TestServer::start_config(&config).await;
    let mut session = server.connect().await;
    session
        .create_collection("wide", CollectionOptions::new().dimension(64))
        .await
        .unwrap();
    for batch in 0..10 {
        let records = (0..500)
            .map(|i| {
                let n = batch * 500 + i;
                Record::new(format!("r{}", n), vec![(n % 97) as f32 + 1.0; 64])
            })
            .collect();
        session.upsert("wide", records).await.unwrap();
    }

    // Enough query vectors that the scan runs far past the lock timeout.
    let query = serde_json::json!({
        "id": 1,
        "command": {
            "op": "query",
            "collection": "wide",
            "query_vectors": vec![vec![1.0f32; 64]; 4000],
            "k": 5,
        },
    });
    let mut frame = serde_json::to_vec(&query).unwrap();
    frame.push(b'\n');
    let mut raw = TcpStream::connect(server.addr).await.unwrap();
    raw.write_all(&frame).await.unwrap();
    raw.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    drop(raw);

    let upsert = session.upsert("wide", vec![Record::new("late", vec![0.5; 64])]);
    let ids = tokio::time::timeout(config.lock_timeout(), upsert)
        .await
        .expect("upsert waited past the lock timeout")
        .unwrap();
    assert_eq!(ids, vec!["late"]);
    assert_eq!(session.count("wide").await.unwrap(), 5001);

    session.close().await.unwrap();
    server.stop().await;
}
