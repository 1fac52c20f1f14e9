//! Catalog lookups over HTTP against a seeded in-memory store.

use serde_json::json;

use crate::support::{get, seeded_store, start_server};

#[tokio::test]
async fn brands_are_distinct_trimmed_and_sorted() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!("{base}/api/brands")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": [
                { "name": "AUDI" },
                { "name": "Audi" },
                { "name": "BMW" },
                { "name": "FIAT" },
            ],
            "count": 4,
        })
    );
}

#[tokio::test]
async fn models_ignore_brand_case() {
    let base = start_server(seeded_store()).await;

    let (status, upper) = get(format!("{base}/api/models?brand=AUDI")).await;
    assert_eq!(status, 200);
    assert_eq!(upper, json!({ "success": true, "data": ["A1", "A3"], "count": 2 }));

    let (status, lower) = get(format!("{base}/api/models?brand=audi")).await;
    assert_eq!(status, 200);
    assert_eq!(upper, lower);
}

#[tokio::test]
async fn models_match_whole_brand_only() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!("{base}/api/models?brand=AUD")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true, "data": [], "count": 0 }));

    let (_, body) = get(format!("{base}/api/models?brand=.*")).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn versions_exclude_blank_values() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!("{base}/api/versions?brand=AUDI&model=A1")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": true, "data": ["1.0 TFSi", "1.4 TFSi MT"], "count": 2 })
    );
}

#[tokio::test]
async fn auto_info_returns_matching_listing() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!(
        "{base}/api/auto-info?brand=AUDI&model=A1&version=1.4%20TFSi%20MT"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {
                "marca": "AUDI",
                "modelo": "A1",
                "version": "1.4 TFSi MT",
                "id": "a1-1",
            },
        })
    );
}

#[tokio::test]
async fn auto_info_matches_case_insensitively() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!(
        "{base}/api/auto-info?brand=audi&model=a3&version=1.5%20tfsi"
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["marca"], " Audi ");
    assert_eq!(body["data"]["id"], "a3-2");
}

#[tokio::test]
async fn auto_info_unknown_version_is_404() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!(
        "{base}/api/auto-info?brand=AUDI&model=A1&version=NoSuchVersion"
    ))
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn model_versions_sorted_with_combined_label() {
    let base = start_server(seeded_store()).await;

    let (status, body) = get(format!("{base}/api/model-versions?brand=AUDI")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 6);

    let pairs: Vec<(String, String)> = entries
        .iter()
        .map(|e| {
            (
                e["model"].as_str().unwrap().to_string(),
                e["version"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let mut sorted = pairs.clone();
    sorted.sort();
    assert_eq!(pairs, sorted);

    for entry in entries {
        let expected = format!(
            "{} - {}",
            entry["model"].as_str().unwrap(),
            entry["version"].as_str().unwrap()
        );
        assert_eq!(entry["combined"], expected);
    }
    assert_eq!(entries[5]["combined"], "A3 - 2.0 TDI");
}
