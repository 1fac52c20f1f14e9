//! Missing parameters and store failures.

use crate::support::{get, seeded_store, start_server, BrokenStore};

#[tokio::test]
async fn missing_parameters_are_400() {
    let base = start_server(seeded_store()).await;

    for path in [
        "/api/models",
        "/api/models?brand=",
        "/api/models?brand=%20%20",
        "/api/versions?brand=AUDI",
        "/api/versions?model=A1",
        "/api/auto-info?brand=AUDI&model=A1",
        "/api/auto-info",
        "/api/model-versions",
    ] {
        let (status, body) = get(format!("{base}{path}")).await;
        assert_eq!(status, 400, "{path}");
        assert_eq!(body["success"], false, "{path}");
        assert!(
            body["error"].as_str().unwrap().contains("required"),
            "{path}"
        );
    }
}

#[tokio::test]
async fn missing_brand_message_names_the_parameter() {
    let base = start_server(seeded_store()).await;

    let (_, body) = get(format!("{base}/api/models")).await;
    assert_eq!(body["error"], "brand parameter is required");
}

#[tokio::test]
async fn store_failures_are_500_without_detail() {
    let base = start_server(BrokenStore).await;

    for path in [
        "/api/brands",
        "/api/models?brand=AUDI",
        "/api/versions?brand=AUDI&model=A1",
        "/api/auto-info?brand=AUDI&model=A1&version=x",
        "/api/model-versions?brand=AUDI",
    ] {
        let (status, body) = get(format!("{base}{path}")).await;
        assert_eq!(status, 500, "{path}");
        assert_eq!(body["success"], false, "{path}");
        assert_eq!(body["error"], "Internal server error", "{path}");
        assert!(!body.to_string().contains("secret-host"), "{path}");
    }
}

#[tokio::test]
async fn parameter_checks_run_before_the_store() {
    let base = start_server(BrokenStore).await;

    let (status, _) = get(format!("{base}/api/models")).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn repeated_parameters_are_json_400() {
    let base = start_server(seeded_store()).await;

    for path in [
        "/api/models?brand=AUDI&brand=BMW",
        "/api/versions?brand=AUDI&model=A1&model=A3",
        "/api/auto-info?brand=AUDI&model=A1&version=x&version=y",
        "/api/model-versions?brand=AUDI&brand=AUDI",
    ] {
        let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
        assert_eq!(resp.status(), 400, "{path}");
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "{path}");

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false, "{path}");
        assert!(
            body["error"].as_str().unwrap().starts_with("invalid query string"),
            "{path}"
        );
    }
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let base = start_server(seeded_store()).await;
    let client = reqwest::Client::new();

    for path in ["/api/brands", "/api/models?brand=AUDI", "/health", "/"] {
        let resp = client.post(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), 405, "{path}");
        assert_eq!(
            resp.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("GET, HEAD"),
            "{path}"
        );

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false, "{path}");
        assert_eq!(body["error"], "Method not allowed", "{path}");
    }
}
