use super::test_utilities::{TestClient, TestServer};

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let helper = TestClient::new(&server);

    let response = helper.health_check().await.unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");
    let helper = TestClient::new(&server);

    let response = helper.get_path("/nonexistent-endpoint").await.unwrap();

    assert_eq!(response.status(), 404);
}
