mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use base64::{engine::general_purpose::STANDARD, Engine};
use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn signup_then_login() {
    let app = spawn_app();
    let user_id = app.signup("alice").await;

    let response = app
        .server
        .post("/login")
        .json(&json!({"username": "alice", "password": "hunter22"}))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["userID"].as_i64(), Some(user_id));
}

#[tokio::test]
async fn login_failures_are_distinguished() {
    let app = spawn_app();
    app.signup("alice").await;

    let wrong_password = app
        .server
        .post("/login")
        .json(&json!({"username": "alice", "password": "nope"}))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown = app
        .server
        .post("/login")
        .json(&json!({"username": "bob", "password": "hunter22"}))
        .await;
    unknown.assert_status(StatusCode::NOT_FOUND);

    let missing = app
        .server
        .post("/login")
        .json(&json!({"username": "alice"}))
        .await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert!(missing.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn duplicate_username_or_email_is_a_conflict() {
    let app = spawn_app();
    app.signup("alice").await;

    let same_name = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "alice",
            "password": "pw123456",
            "email": "other@example.com",
            "phoneNumber": "0987654321",
        }))
        .await;
    same_name.assert_status(StatusCode::CONFLICT);

    let same_email = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "alice2",
            "password": "pw123456",
            "email": "alice@example.com",
            "phoneNumber": "0987654321",
        }))
        .await;
    same_email.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_rejects_bad_contact_details() {
    let app = spawn_app();

    let bad_email = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "carol",
            "password": "pw123456",
            "email": "not-an-email",
            "phoneNumber": "0987654321",
        }))
        .await;
    bad_email.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.json::<Value>()["error"], "Invalid email format");

    let bad_phone = app
        .server
        .post("/signup")
        .json(&json!({
            "username": "carol",
            "password": "pw123456",
            "email": "carol@example.com",
            "phoneNumber": "12ab",
        }))
        .await;
    bad_phone.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(bad_phone.json::<Value>()["error"], "Invalid phone number format");
}

#[tokio::test]
async fn mistyped_or_malformed_bodies_are_bad_requests() {
    let app = spawn_app();

    let mistyped = app
        .server
        .post("/signup")
        .json(&json!({"username": 5}))
        .await;
    mistyped.assert_status(StatusCode::BAD_REQUEST);
    assert!(mistyped.json::<Value>()["error"].is_string());

    let truncated = app
        .server
        .post("/login")
        .bytes("{\"username\": ".into())
        .content_type("application/json")
        .await;
    truncated.assert_status(StatusCode::BAD_REQUEST);
    assert!(truncated.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn profile_never_exposes_password_hash() {
    let app = spawn_app();
    let user_id = app.signup("alice").await;

    let response = app
        .server
        .get("/user")
        .add_query_param("userId", user_id)
        .await;
    response.assert_status_ok();

    let data = &response.json::<Value>()["data"];
    assert_eq!(data["UserID"].as_i64(), Some(user_id));
    assert_eq!(data["Username"], "alice");
    assert!(data.get("PasswordHash").is_none());
    assert!(data.get("password_hash").is_none());
    assert!(data["Avatar"].is_null());

    app.server
        .get("/user")
        .add_query_param("userId", 999)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server.get("/user").await.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_info_keeps_introduction_when_omitted() {
    let app = spawn_app();
    let user_id = app.signup("alice").await;

    app.server
        .post("/user/info")
        .json(&json!({
            "userId": user_id,
            "username": "alice",
            "email": "alice@example.com",
            "phoneNumber": "0912345678",
            "introduction": "Loves soup",
        }))
        .await
        .assert_status_ok();

    app.server
        .post("/user/info")
        .json(&json!({
            "userId": user_id,
            "username": "alice_b",
            "email": "alice@example.com",
            "phoneNumber": "+84912345678",
        }))
        .await
        .assert_status_ok();

    let data = app
        .server
        .get("/user")
        .add_query_param("userId", user_id)
        .await
        .json::<Value>()["data"]
        .clone();
    assert_eq!(data["Username"], "alice_b");
    assert_eq!(data["Introduction"], "Loves soup");

    app.server
        .post("/user/info")
        .json(&json!({
            "userId": 4242,
            "username": "ghost",
            "email": "ghost@example.com",
            "phoneNumber": "0912345678",
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn avatar_upload_round_trips_as_base64() {
    let app = spawn_app();
    let user_id = app.signup("alice").await;
    let image: Vec<u8> = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff];

    let form = MultipartForm::new()
        .add_text("userId", user_id)
        .add_part("avatar", Part::bytes(image.clone()).file_name("me.png"));
    app.server
        .post("/user/avatar")
        .multipart(form)
        .await
        .assert_status_ok();

    let users = app.server.get("/users/avt").await.json::<Value>();
    let me = &users["users"][0];
    assert_eq!(me["UserID"].as_i64(), Some(user_id));
    assert_eq!(me["Avatar"], STANDARD.encode(&image));
}

#[tokio::test]
async fn avatar_upload_requires_user_and_file() {
    let app = spawn_app();
    app.signup("alice").await;

    let no_user = MultipartForm::new()
        .add_part("avatar", Part::bytes(vec![1u8, 2, 3]).file_name("me.png"));
    app.server
        .post("/user/avatar")
        .multipart(no_user)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let unknown_user = MultipartForm::new()
        .add_text("userId", 77)
        .add_part("avatar", Part::bytes(vec![1u8, 2, 3]).file_name("me.png"));
    app.server
        .post("/user/avatar")
        .multipart(unknown_user)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_search_requires_every_word() {
    let app = spawn_app();
    let anna = app.signup("anna_baker").await;
    app.signup("anna_smith").await;
    let bob = app.signup("bob_baker").await;

    let response = app
        .server
        .post("/search/user")
        .json(&json!({"name": "anna baker"}))
        .await;
    response.assert_status_ok();
    let found: Vec<i64> = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["UserID"].as_i64().unwrap())
        .collect();
    assert_eq!(found, vec![anna]);

    let by_ids = app
        .server
        .post("/search/user")
        .json(&json!({"ids": [bob]}))
        .await
        .json::<Value>();
    assert_eq!(by_ids["data"][0]["Username"], "bob_baker");

    app.server
        .post("/search/user")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
