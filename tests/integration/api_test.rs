//! Integration tests for the presence store service HTTP API.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

fn report_body(user: Uuid, session: Uuid, status: &str) -> serde_json::Value {
    json!({
        "user_id": user,
        "session_id": session,
        "status": status,
        "reported_at": chrono::Utc::now(),
    })
}

#[tokio::test]
async fn test_report_then_query() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let resp = app
        .request(
            "POST",
            "/api/presence/report",
            Some(report_body(user, Uuid::new_v4(), "active")),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["success"], json!(true));

    let resp = app
        .request("GET", &format!("/api/presence/{user}"), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["data"]["is_online"], json!(true));
    assert!(!resp.json["data"]["last_seen_at"].is_null());

    // The shared store behind the router agrees.
    let direct = app
        .state
        .store
        .query_at(user.into(), chrono::Utc::now());
    assert!(direct.is_online);
}

#[tokio::test]
async fn test_unknown_user_queries_offline() {
    let app = TestApp::new();

    let resp = app
        .request("GET", &format!("/api/presence/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["data"]["is_online"], json!(false));
    assert!(resp.json["data"]["last_seen_at"].is_null());
}

#[tokio::test]
async fn test_report_rejects_nil_user() {
    let app = TestApp::new();

    let resp = app
        .request(
            "POST",
            "/api/presence/report",
            Some(report_body(Uuid::nil(), Uuid::new_v4(), "active")),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json["error"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_multi_tab_aggregation_over_http() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let tab_a = Uuid::new_v4();
    let tab_b = Uuid::new_v4();

    for (session, status) in [(tab_a, "active"), (tab_b, "active"), (tab_a, "offline")] {
        let resp = app
            .request(
                "POST",
                "/api/presence/report",
                Some(report_body(user, session, status)),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK);
    }

    let resp = app
        .request("GET", &format!("/api/presence/{user}"), None)
        .await;
    assert_eq!(resp.json["data"]["is_online"], json!(true));
}

#[tokio::test]
async fn test_online_listing_excludes_offline_users() {
    let app = TestApp::new();
    let online_user = Uuid::new_v4();
    let offline_user = Uuid::new_v4();

    app.request(
        "POST",
        "/api/presence/report",
        Some(report_body(online_user, Uuid::new_v4(), "idle")),
    )
    .await;
    app.request(
        "POST",
        "/api/presence/report",
        Some(report_body(offline_user, Uuid::new_v4(), "offline")),
    )
    .await;

    let resp = app.request("GET", "/api/presence/online", None).await;
    assert_eq!(resp.status, StatusCode::OK);

    let listed: Vec<String> = resp.json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["user_id"].as_str().unwrap().to_string())
        .collect();
    assert!(listed.contains(&online_user.to_string()));
    assert!(!listed.contains(&offline_user.to_string()));

    // Idle is exposed distinctly for consumers that care.
    let entry = resp.json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["user_id"] == json!(online_user))
        .unwrap();
    assert_eq!(entry["status"], json!("idle"));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let resp = app.request("GET", "/api/health", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["data"]["status"], json!("ok"));
}
