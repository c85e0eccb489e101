// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Skill request lifecycle tests: send, answer, list, dashboard, activity.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn send_request(app: &axum::Router, token: &str, skill_id: u64) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/requests",
            Some(token),
            json!({ "skill_id": skill_id }),
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

async fn answer(app: &axum::Router, token: &str, request_id: u64, status: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            &format!("/api/requests/{request_id}"),
            Some(token),
            json!({ "status": status }),
        ))
        .await
        .unwrap();
    let code = response.status();
    (code, common::body_json(response).await)
}

async fn get_authed(app: &axum::Router, token: &str, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(common::empty_request("GET", uri, Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    common::body_json(response).await
}

#[tokio::test]
async fn test_request_lifecycle() {
    let (app, _) = common::create_test_app();
    let (maria_id, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (alex_id, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let skill_id = common::offer_skill(&app, &maria, "Beginner Guitar Lessons", "Creative Arts").await;

    let (status, request) = send_request(&app, &alex, skill_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["status"], "Pending");
    assert_eq!(request["requester_id"], alex_id);
    assert_eq!(request["owner_id"], maria_id);
    assert_eq!(request["skill_name"], "Beginner Guitar Lessons");
    let request_id = request["id"].as_u64().unwrap();

    // Each side sees it from their own direction
    let alex_view = get_authed(&app, &alex, "/api/requests").await;
    assert_eq!(alex_view["outgoing"].as_array().unwrap().len(), 1);
    assert_eq!(alex_view["incoming"], json!([]));
    let maria_view = get_authed(&app, &maria, "/api/requests").await;
    assert_eq!(maria_view["incoming"][0]["id"], request_id);

    // Only the owner answers
    let (status, _) = answer(&app, &alex, request_id, "Accepted").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = answer(&app, &maria, request_id, "Accepted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Accepted");

    // Answers are final
    let (status, _) = answer(&app, &maria, request_id, "Declined").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The requester hears about it
    let feed = get_authed(&app, &alex, "/api/activity").await;
    assert_eq!(
        feed[0]["text"],
        "Your request for \"Beginner Guitar Lessons\" was accepted."
    );
    assert_eq!(feed[0]["time"], "just now");
}

#[tokio::test]
async fn test_request_rules() {
    let (app, _) = common::create_test_app();
    let (_, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let skill_id = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;

    // Own skill
    let (status, _) = send_request(&app, &maria, skill_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown skill
    let (status, _) = send_request(&app, &alex, 999_999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // One pending request per skill and requester
    let (status, first) = send_request(&app, &alex, skill_id).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send_request(&app, &alex, skill_id).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // "Pending" is not an answer
    let request_id = first["id"].as_u64().unwrap();
    let (status, _) = answer(&app, &maria, request_id, "Pending").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Once declined, asking again is allowed
    let (status, _) = answer(&app, &maria, request_id, "Declined").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send_request(&app, &alex, skill_id).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_request_status_filter() {
    let (app, _) = common::create_test_app();
    let (_, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let guitar = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;
    let bread = common::offer_skill(&app, &maria, "Sourdough Bread Making", "Lifestyle").await;

    let (_, first) = send_request(&app, &alex, guitar).await;
    send_request(&app, &alex, bread).await;
    answer(&app, &maria, first["id"].as_u64().unwrap(), "Accepted").await;

    let pending = get_authed(&app, &alex, "/api/requests?status=Pending").await;
    let outgoing = pending["outgoing"].as_array().unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0]["skill_name"], "Sourdough Bread Making");

    let accepted = get_authed(&app, &maria, "/api/requests?status=Accepted").await;
    assert_eq!(accepted["incoming"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let (app, _) = common::create_test_app();
    let (_, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let (_, sam) = common::register_and_login(&app, "Sam Wilson", "sam@example.com").await;
    let guitar = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;
    common::offer_skill(&app, &maria, "Sourdough Bread Making", "Lifestyle").await;

    let (_, from_alex) = send_request(&app, &alex, guitar).await;
    send_request(&app, &sam, guitar).await;
    answer(&app, &maria, from_alex["id"].as_u64().unwrap(), "Declined").await;

    let dashboard = get_authed(&app, &maria, "/api/dashboard").await;
    assert_eq!(dashboard["name"], "Maria Garcia");
    assert_eq!(dashboard["incoming"], json!({ "pending": 1, "accepted": 0, "declined": 1 }));
    assert_eq!(dashboard["outgoing"], json!({ "pending": 0, "accepted": 0, "declined": 0 }));

    let offered = dashboard["offered_skills"].as_array().unwrap();
    assert_eq!(offered.len(), 2);
    assert_eq!(offered[0]["name"], "Guitar Lessons");
    assert_eq!(offered[0]["requests"], 2);
    assert_eq!(offered[1]["requests"], 0);

    let alex_dashboard = get_authed(&app, &alex, "/api/dashboard").await;
    assert_eq!(alex_dashboard["outgoing"]["declined"], 1);
    assert_eq!(
        alex_dashboard["requested_skills"][0]["skill_name"],
        "Guitar Lessons"
    );
}

#[tokio::test]
async fn test_removing_skill_declines_pending_requests() {
    let (app, _) = common::create_test_app();
    let (_, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let guitar = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;
    send_request(&app, &alex, guitar).await;

    let response = app
        .clone()
        .oneshot(common::empty_request(
            "DELETE",
            &format!("/api/skills/{guitar}"),
            Some(&maria),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let view = get_authed(&app, &alex, "/api/requests").await;
    assert_eq!(view["outgoing"][0]["status"], "Declined");
}

#[tokio::test]
async fn test_deactivation_withdraws_listings() {
    let (app, state) = common::create_test_app();
    let (maria_id, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let guitar = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;
    send_request(&app, &alex, guitar).await;

    let response = app
        .clone()
        .oneshot(common::empty_request("DELETE", "/api/account", Some(&maria)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(state.db.skills_by_owner(maria_id).is_empty());
    let view = get_authed(&app, &alex, "/api/requests").await;
    assert_eq!(view["outgoing"][0]["status"], "Declined");

    let response = app
        .oneshot(common::empty_request(
            "GET",
            &format!("/api/users/{maria_id}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deactivation_withdraws_sent_requests() {
    let (app, _) = common::create_test_app();
    let (_, maria) = common::register_and_login(&app, "Maria Garcia", "maria@example.com").await;
    let (_, alex) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;
    let guitar = common::offer_skill(&app, &maria, "Guitar Lessons", "Creative Arts").await;
    let (_, request) = send_request(&app, &alex, guitar).await;

    let response = app
        .clone()
        .oneshot(common::empty_request("DELETE", "/api/account", Some(&alex)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let view = get_authed(&app, &maria, "/api/requests?status=Pending").await;
    assert!(view["incoming"].as_array().unwrap().is_empty());
    let view = get_authed(&app, &maria, "/api/requests").await;
    assert_eq!(view["incoming"][0]["id"], request["id"]);
    assert_eq!(view["incoming"][0]["status"], "Declined");

    // Nothing left for the owner to answer
    let (status, _) = answer(&app, &maria, request["id"].as_u64().unwrap(), "Accepted").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let feed = get_authed(&app, &maria, "/api/activity").await;
    assert_eq!(
        feed[0]["text"],
        "Alex Ray withdrew their request for \"Guitar Lessons\"."
    );
}

#[tokio::test]
async fn test_activity_limit_bounds() {
    let (app, _) = common::create_test_app();
    let (_, token) = common::register_and_login(&app, "Alex Ray", "alex@example.com").await;

    for uri in ["/api/activity?limit=0", "/api/activity?limit=101"] {
        let response = app
            .clone()
            .oneshot(common::empty_request("GET", uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {uri}");
    }

    let feed = get_authed(&app, &token, "/api/activity?limit=5").await;
    assert!(feed.as_array().unwrap().len() <= 5);
}
