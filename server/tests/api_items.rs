mod common;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use common::spawn_app;
use diesel::prelude::*;
use market_server::models::NewItem;
use market_server::schema::item;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::thread;

#[tokio::test]
async fn item_ids_are_assigned_by_the_database() {
    let app = spawn_app();
    let first = app.create_item("Milk").await;
    let second = app.create_item("Eggs").await;
    assert_ne!(first, second);

    let response = app.server.get("/item").add_query_param("id", second).await;
    response.assert_status_ok();
    let data = &response.json::<Value>()["data"];
    assert_eq!(data[0]["ItemName"], "Eggs");
    assert_eq!(data[0]["ItemDescription"], "fresh Eggs");
    assert!(data[0]["ItemImg"].is_null());
}

#[tokio::test]
async fn item_requires_a_name() {
    let app = spawn_app();
    let form = MultipartForm::new().add_text("itemDescription", "nameless");
    app.server
        .post("/item")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_description_is_stored_as_sent() {
    let app = spawn_app();
    let form = MultipartForm::new()
        .add_text("itemName", "Flour")
        .add_text("itemDescription", "  sifted\n");
    let created = app.server.post("/item").multipart(form).await;
    created.assert_status(StatusCode::CREATED);
    let item_id = created.json::<Value>()["itemId"].as_i64().unwrap();

    let found = app
        .server
        .get("/item")
        .add_query_param("id", item_id)
        .await
        .json::<Value>();
    assert_eq!(found["data"][0]["ItemDescription"], "  sifted\n");
}

#[tokio::test]
async fn name_search_matches_any_word_ignoring_case() {
    let app = spawn_app();
    app.create_item("Green Apple").await;
    app.create_item("Banana").await;
    app.create_item("Apple Juice").await;
    app.create_item("100% Cocoa").await;

    let response = app
        .server
        .get("/item")
        .add_query_param("name", "apple banana")
        .await;
    response.assert_status_ok();
    let names: Vec<String> = response.json::<Value>()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["ItemName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Green Apple", "Banana", "Apple Juice"]);

    let upper = app.server.get("/item").add_query_param("name", "BANANA").await;
    assert_eq!(upper.json::<Value>()["data"][0]["ItemName"], "Banana");

    // A literal percent sign is not a wildcard.
    let percent = app.server.get("/item").add_query_param("name", "0%").await;
    assert_eq!(percent.json::<Value>()["data"].as_array().unwrap().len(), 1);

    app.server
        .get("/item")
        .add_query_param("name", "durian")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server.get("/item").await.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalogue_is_paginated() {
    let app = spawn_app();
    for i in 0..12 {
        app.create_item(&format!("item {i}")).await;
    }

    let first = app.server.get("/item/all").await.json::<Value>();
    assert_eq!(first["items"].as_array().unwrap().len(), 10);
    assert_eq!(
        first["pagination"],
        json!({"currentPage": 1, "totalPages": 2, "totalItems": 12})
    );

    let second = app
        .server
        .get("/item/all")
        .add_query_param("page", 2)
        .add_query_param("limit", 5)
        .await
        .json::<Value>();
    let names: Vec<&str> = second["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["ItemName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["item 5", "item 6", "item 7", "item 8", "item 9"]);
    assert_eq!(second["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn oversized_page_and_limit_are_served() {
    let app = spawn_app();
    app.create_item("Milk").await;

    let wide = app
        .server
        .get("/item/all")
        .add_query_param("limit", i64::MAX)
        .await;
    wide.assert_status_ok();
    let wide = wide.json::<Value>();
    assert_eq!(wide["items"].as_array().unwrap().len(), 1);
    assert_eq!(wide["pagination"]["totalPages"], 1);

    let far = app
        .server
        .get("/item/all")
        .add_query_param("page", i64::MAX)
        .add_query_param("limit", i64::MAX)
        .await;
    far.assert_status_ok();
    assert!(far.json::<Value>()["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_query_values_get_a_json_error() {
    let app = spawn_app();
    let response = app
        .server
        .get("/fridge")
        .add_query_param("UserID", "abc")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[test]
fn concurrent_inserts_never_share_an_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("market.db");
    let pool = market_server::db::create_pool(path.to_str().unwrap(), 8).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let pool = pool.clone();
            thread::spawn(move || {
                let mut conn = pool.get().unwrap();
                (0..10)
                    .map(|i| {
                        let name = format!("thread {t} item {i}");
                        diesel::insert_into(item::table)
                            .values(NewItem {
                                item_name: &name,
                                item_description: None,
                                item_img: None,
                            })
                            .returning(item::item_id)
                            .get_result::<i32>(&mut conn)
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<i32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let distinct: HashSet<i32> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 80);
    assert_eq!(distinct.len(), 80);
}

#[tokio::test]
async fn fridge_upserts_by_user_and_item() {
    let app = spawn_app();
    let user_id = app.signup("alice").await;
    let milk = app.create_item("Milk").await;
    let eggs = app.create_item("Eggs").await;

    app.server
        .get("/fridge")
        .add_query_param("UserID", user_id)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let stock = [
        (milk, 1, "2024-11-05"),
        (eggs, 12, "2024-11-20"),
        (milk, 3, "2024-11-09"),
    ];
    for (item_id, amount, expire) in stock {
        app.server
            .post("/fridge/item")
            .json(&json!({
                "itemId": item_id,
                "userId": user_id,
                "expireDate": expire,
                "amount": amount,
            }))
            .await
            .assert_status_ok();
    }

    let fridge = app
        .server
        .get("/fridge")
        .add_query_param("UserID", user_id)
        .await
        .json::<Value>();
    let data = fridge["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["ItemID"].as_i64(), Some(milk));
    assert_eq!(data[0]["Amount"], 3);
    assert_eq!(data[0]["ExpireDate"], "2024-11-09");

    app.server
        .delete("/fridge/item")
        .add_query_param("UserID", user_id)
        .add_query_param("ItemID", milk)
        .await
        .assert_status_ok();
    app.server
        .delete("/fridge/item")
        .add_query_param("UserID", user_id)
        .add_query_param("ItemID", milk)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .delete("/fridge/all")
        .add_query_param("UserID", user_id)
        .await
        .assert_status_ok();
    app.server
        .get("/fridge")
        .add_query_param("UserID", user_id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
