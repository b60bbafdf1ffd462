use ganimart::{routes::health::health_check, store::migrations::CURRENT_VERSION};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.schema_version, CURRENT_VERSION);
}
