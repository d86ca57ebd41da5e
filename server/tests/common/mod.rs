#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use market_server::db::{self, DbPool};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// A server backed by its own SQLite file, removed when dropped.
pub struct TestApp {
    pub server: TestServer,
    pub pool: DbPool,
    _dir: TempDir,
}

pub fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("market.db");
    let pool = db::create_pool(db_path.to_str().unwrap(), 4).unwrap();
    let server = TestServer::new(market_server::app(pool.clone(), MAX_UPLOAD_BYTES)).unwrap();

    TestApp {
        server,
        pool,
        _dir: dir,
    }
}

impl TestApp {
    /// Signs up `username` and returns the new user id.
    pub async fn signup(&self, username: &str) -> i64 {
        let response = self
            .server
            .post("/signup")
            .json(&json!({
                "username": username,
                "password": "hunter22",
                "email": format!("{username}@example.com"),
                "phoneNumber": "0912345678",
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["userId"].as_i64().unwrap()
    }

    pub async fn create_item(&self, name: &str) -> i64 {
        let form = MultipartForm::new()
            .add_text("itemName", name)
            .add_text("itemDescription", format!("fresh {name}"));
        let response = self.server.post("/item").multipart(form).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["itemId"].as_i64().unwrap()
    }

    pub async fn create_recipe(&self, user_id: i64, name: &str) -> i64 {
        let form = MultipartForm::new()
            .add_text("userId", user_id)
            .add_text("recipeName", name)
            .add_text("instructions", "Mix and cook.")
            .add_part(
                "recipeImg",
                Part::bytes(vec![0xffu8, 0xd8, 0xff, 0x00]).file_name("dish.jpg"),
            );
        let response = self.server.post("/recipe").multipart(form).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["recipeId"].as_i64().unwrap()
    }

    pub async fn create_list(&self, user_id: i64, date: &str, items: &[(i64, i64)]) -> i64 {
        let lines: Vec<Value> = items
            .iter()
            .map(|(item_id, amount)| json!({"ItemID": item_id, "amount": amount}))
            .collect();
        let response = self
            .server
            .post("/daily-list")
            .json(&json!({
                "listItems": lines,
                "dateToBuy": date,
                "userId": user_id,
                "cost": 12.5,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["listId"].as_i64().unwrap()
    }

    pub async fn create_group(&self, admin_id: i64, name: &str) -> i64 {
        let response = self
            .server
            .post("/group/create")
            .json(&json!({"groupName": name, "adminId": admin_id}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["groupId"].as_i64().unwrap()
    }
}
