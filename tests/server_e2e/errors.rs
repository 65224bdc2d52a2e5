//! Error kinds across the wire

use crate::*;

#[tokio::test]
async fn test_not_found_round_trip() {
    let server = TestServer::start().await;
    let mut session = server.connect().await;

    let err = session.get_collection("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {:?}", err);
    assert!(err.to_string().contains("missing"));

    // An error response leaves the session usable.
    assert!(session.is_open());
    session.heartbeat().await.unwrap();

    server.stop().await;
}

#[tokio::test]
async fn test_dimension_mismatch_round_trip() {
    let server = TestServer::start().await;
    let mut session = server.connect().await;

    session
        .create_collection("t", CollectionOptions::new().dimension(3))
        .await
        .unwrap();
    let err = session
        .upsert("t", vec![Record::new("a", vec![1.0, 2.0])])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    );

    let err = session
        .query("t", vec![vec![1.0; 4]], 1, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        Error::DimensionMismatch {
            expected: 3,
            actual: 4
        }
    );

    server.stop().await;
}

#[tokio::test]
async fn test_already_exists_and_invalid_argument() {
    let server = TestServer::start().await;
    let mut session = server.connect().await;

    session
        .create_collection("dup", CollectionOptions::new())
        .await
        .unwrap();
    assert!(matches!(
        session
            .create_collection("dup", CollectionOptions::new())
            .await,
        Err(Error::AlreadyExists(_))
    ));
    assert!(matches!(
        session
            .create_collection("bad name", CollectionOptions::new())
            .await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        session.query("dup", vec![vec![1.0]], 0, None).await,
        Err(Error::InvalidArgument(_))
    ));

    server.stop().await;
}

#[tokio::test]
async fn test_connect_to_stopped_server_is_unavailable() {
    let server = TestServer::start().await;
    let config = server.client_config();
    server.stop().await;

    match Session::connect(config).await {
        Err(Error::Unavailable(_)) => {}
        Err(other) => panic!("expected Unavailable, got {:?}", other),
        Ok(_) => panic!("connect should fail after shutdown"),
    }
}
