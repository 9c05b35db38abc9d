//! End-to-end tests for the REST endpoints.

#![allow(clippy::panic)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{http_url, spawn_server};

async fn register(
    client: &reqwest::Client,
    base: std::net::SocketAddr,
    body: Value,
) -> (StatusCode, Value) {
    let Ok(response) = client
        .post(http_url(base, "/api/register"))
        .json(&body)
        .send()
        .await
    else {
        panic!("register request failed");
    };
    let status = response.status();
    let Ok(body) = response.json::<Value>().await else {
        panic!("register response is not JSON");
    };
    (status, body)
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let Ok(response) = client.get(url).send().await else {
        panic!("GET request failed");
    };
    let status = response.status();
    let Ok(body) = response.json::<Value>().await else {
        panic!("GET response is not JSON");
    };
    (status, body)
}

#[tokio::test]
async fn register_duplicate_and_lookup_flow() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = register(
        &client,
        addr,
        json!({"name": "A", "email": "a@x.com", "grade": 9}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student registered successfully!");
    assert_eq!(
        body["student"],
        json!({"id": 1, "name": "A", "email": "a@x.com", "grade": 9})
    );

    let (status, body) = register(
        &client,
        addr,
        json!({"name": "A again", "email": "a@x.com", "grade": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered!");

    let (status, body) = get_json(&client, http_url(addr, "/api/students/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "A");

    let (status, body) = get_json(&client, http_url(addr, "/api/students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn ids_follow_store_size() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    for i in 1..=3 {
        let (status, body) = register(
            &client,
            addr,
            json!({"name": format!("S{i}"), "email": format!("s{i}@x.com"), "grade": "10"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["student"]["id"], i);
        assert_eq!(body["student"]["grade"], 10);
    }

    let (_, body) = get_json(&client, http_url(addr, "/api/students")).await;
    let ids: Vec<i64> = body
        .as_array()
        .map(|a| a.iter().filter_map(|s| s["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = register(&client, addr, json!({"name": "A", "grade": 9})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: email");
    assert_eq!(body["code"], 1001);

    let (_, body) = get_json(&client, http_url(addr, "/api/students")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let Ok(response) = client
        .post(http_url(addr, "/api/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let Ok(body) = response.json::<Value>().await else {
        panic!("error response is not JSON");
    };
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, http_url(addr, "/api/students/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn negative_id_is_not_found() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, http_url(addr, "/api/students/-1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, http_url(addr, "/api/students/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn concurrent_registrations_get_unique_ids() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            register(
                &client,
                addr,
                json!({"name": "S", "email": format!("c{i}@x.com"), "grade": 11}),
            )
            .await
        }));
    }
    for handle in handles {
        let Ok((status, _)) = handle.await else {
            panic!("task failed");
        };
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = get_json(&client, http_url(addr, "/api/students")).await;
    let mut ids: Vec<i64> = body
        .as_array()
        .map(|a| a.iter().filter_map(|s| s["id"].as_i64()).collect())
        .unwrap_or_default();
    ids.sort_unstable();
    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn health_reports_student_count() {
    let addr = spawn_server().await;
    let client = reqwest::Client::new();

    let _ = register(
        &client,
        addr,
        json!({"name": "A", "email": "a@x.com", "grade": 12}),
    )
    .await;

    let (status, body) = get_json(&client, http_url(addr, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["students"], 1);
    assert_eq!(body["live_subscribers"], 0);
}

#[tokio::test]
async fn index_serves_registration_page() {
    let addr = spawn_server().await;
    let Ok(response) = reqwest::get(http_url(addr, "/")).await else {
        panic!("GET / failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let Ok(text) = response.text().await else {
        panic!("page is not text");
    };
    assert!(text.contains("studentForm"));
    assert!(text.contains("/api/register"));
}
