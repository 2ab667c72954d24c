//! End-to-end tests for the probe endpoints over a live listener.

use serde_json::Value;

mod common;

#[tokio::test]
async fn test_status_returns_envelope() {
    let addr = common::spawn_probe().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["status"], "operational");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_request_echoes_parameter() {
    let addr = common::spawn_probe().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/request?test=hello"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert!(common::session_cookie(&res).is_some());

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 200);
    assert!(body["data"].as_str().unwrap().contains("hello"));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_session_cookie_reused_across_requests() {
    let addr = common::spawn_probe().await;
    let client = reqwest::Client::new();

    let first = client
        .get(format!("http://{addr}/session"))
        .send()
        .await
        .unwrap();
    let cookie = common::session_cookie(&first).expect("cookie issued on first contact");
    let first_body: Value = first.json().await.unwrap();
    let first_id = first_body["data"].as_str().unwrap().to_string();

    let second = client
        .get(format!("http://{addr}/session"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(
        common::session_cookie(&second).is_none(),
        "existing session must not be re-issued"
    );
    let second_body: Value = second.json().await.unwrap();
    assert_eq!(second_body["data"].as_str().unwrap(), first_id);
}

#[tokio::test]
async fn test_compare_succeeds_for_new_and_existing_sessions() {
    let addr = common::spawn_probe().await;
    let client = reqwest::Client::new();

    let first = client
        .get(format!("http://{addr}/compare"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status().as_u16(), 200);
    let cookie = common::session_cookie(&first).expect("cookie issued on first contact");
    let body: Value = first.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": 200 }));

    let second = client
        .get(format!("http://{addr}/compare"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status().as_u16(), 200);
}

#[tokio::test]
async fn test_unmatched_route_envelope() {
    let addr = common::spawn_probe().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "no matching route");
    assert!(body.get("data").is_none());
}
