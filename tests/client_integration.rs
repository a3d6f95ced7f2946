// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration tests for the fitness API client against a mocked backend

use mockito::{Matcher, Server};
use octofit_dashboard::client::{ApiError, FitnessApi, HttpApiClient};
use octofit_dashboard::models::{normalize_collection, Resource};
use serde_json::json;

#[tokio::test]
async fn test_list_returns_plain_array_unchanged() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/teams/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"name": "Team Marvel"}, {"name": "Team DC"}]).to_string())
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let body = client.list(Resource::Teams).await.unwrap();

    mock.assert_async().await;
    assert_eq!(body, json!([{"name": "Team Marvel"}, {"name": "Team DC"}]));
}

#[tokio::test]
async fn test_list_leaves_envelope_for_the_caller() {
    let mut server = Server::new_async().await;
    let envelope = json!({"count": 1, "results": [{"rank": 1, "user_name": "Tony Stark"}]});
    server
        .mock("GET", "/api/leaderboard/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope.to_string())
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let body = client.list(Resource::Leaderboard).await.unwrap();

    assert_eq!(body, envelope);
    assert_eq!(normalize_collection(body).len(), 1);
}

#[tokio::test]
async fn test_list_non_success_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/activities/")
        .with_status(404)
        .with_body("not here")
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let err = client.list(Resource::Activities).await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 404 });
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_list_rejects_non_json_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/workouts/")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let err = client.list(Resource::Workouts).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Nothing listens on port 1
    let client = HttpApiClient::with_base_url("http://127.0.0.1:1");
    let err = client.list(Resource::Users).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_update_sends_patch_with_json_body() {
    let mut server = Server::new_async().await;
    let fields = json!({
        "name": "Diana Prince",
        "email": "diana@themyscira.com",
        "team": "Team DC",
        "role": "team_lead",
        "avatar": ""
    });
    let mock = server
        .mock("PATCH", "/api/users/65a1/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(fields.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": "65a1", "name": "Diana Prince"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let updated = client.update(Resource::Users, "65a1", fields).await.unwrap();

    mock.assert_async().await;
    assert_eq!(updated["name"], "Diana Prince");
}

#[tokio::test]
async fn test_update_surfaces_detail_message() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/api/users/u1/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({"detail": "Email already in use"}).to_string())
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let err = client
        .update(Resource::Users, "u1", json!({"email": "taken@example.com"}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Email already in use");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_update_falls_back_to_status_message() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/api/users/u1/")
        .with_status(500)
        .with_body("<h1>Server Error</h1>")
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let err = client
        .update(Resource::Users, "u1", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_update_accepts_empty_success_body() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/api/users/u1/")
        .with_status(204)
        .create_async()
        .await;

    let client = HttpApiClient::with_base_url(server.url());
    let updated = client.update(Resource::Users, "u1", json!({})).await.unwrap();
    assert!(updated.is_null());
}
