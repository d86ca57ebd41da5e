mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn creator_becomes_admin_and_first_member() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let group_id = app.create_group(admin, "Flatmates").await;

    let groups = app
        .server
        .get("/group/user")
        .add_query_param("userId", admin)
        .await
        .json::<Value>();
    assert_eq!(groups["data"][0]["GroupID"].as_i64(), Some(group_id));
    assert_eq!(groups["data"][0]["GroupName"], "Flatmates");
    assert_eq!(groups["data"][0]["AdminID"].as_i64(), Some(admin));
    assert_eq!(groups["data"][0]["Username"], "alice");

    let details = app
        .server
        .get("/group/details")
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    let members = details["data"]["Members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["MemberID"].as_i64(), Some(admin));

    let loner = app.signup("bob").await;
    app.server
        .get("/group/user")
        .add_query_param("userId", loner)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/group/details")
        .add_query_param("groupId", 999)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn group_avatar_upload() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let group_id = app.create_group(admin, "Flatmates").await;

    let form = MultipartForm::new()
        .add_text("groupId", group_id)
        .add_part("groupimg", Part::bytes(vec![1u8, 2, 3, 250]).file_name("g.png"));
    app.server
        .post("/group/avatar")
        .multipart(form)
        .await
        .assert_status_ok();

    let details = app
        .server
        .get("/group/details")
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    assert_eq!(details["data"]["GroupImg"], "AQID+g==");

    let missing_file = MultipartForm::new().add_text("groupId", group_id);
    app.server
        .post("/group/avatar")
        .multipart(missing_file)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adding_members_is_all_or_nothing() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let group_id = app.create_group(admin, "Flatmates").await;

    let rejected = app
        .server
        .post("/group/members")
        .json(&json!({"groupId": group_id, "memberIds": [bob, 777]}))
        .await;
    rejected.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(rejected.json::<Value>()["missingMembers"], json!([777]));

    let members = app
        .server
        .get("/group/members")
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    assert_eq!(members["data"].as_array().unwrap().len(), 1);

    app.server
        .post("/group/members")
        .json(&json!({"groupId": group_id, "memberIds": [bob, admin]}))
        .await
        .assert_status_ok();

    let members = app
        .server
        .get("/group/members")
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    let names: Vec<&str> = members["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["Username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);

    app.server
        .post("/group/members")
        .json(&json!({"groupId": group_id, "memberIds": []}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shared_list_shows_items_and_buyers() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let carol = app.signup("carol").await;
    let milk = app.create_item("Milk").await;
    let eggs = app.create_item("Eggs").await;
    let group_id = app.create_group(admin, "Flatmates").await;
    app.server
        .post("/group/members")
        .json(&json!({"groupId": group_id, "memberIds": [bob, carol]}))
        .await
        .assert_status_ok();

    let list_id = app
        .create_list(admin, "2024-11-02", &[(milk, 1), (eggs, 12)])
        .await;

    app.server
        .get("/group-list")
        .add_query_param("listId", list_id)
        .add_query_param("groupId", group_id)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let share = json!({"listId": list_id, "groupId": group_id, "userId": admin});
    app.server.post("/group-list/share").json(&share).await.assert_status_ok();
    app.server.post("/group-list/share").json(&share).await.assert_status_ok();

    let view = app
        .server
        .get("/group-list")
        .add_query_param("listId", list_id)
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    let data = &view["data"];
    assert_eq!(data["GroupID"].as_i64(), Some(group_id));
    assert_eq!(data["DateToBuy"], "2024-11-02");
    assert_eq!(data["Items"].as_array().unwrap().len(), 2);
    assert_eq!(data["Buyers"], json!([{"BuyerID": admin, "Username": "alice"}]));

    // Replacing buyers drops the old set entirely.
    app.server
        .post("/group-list/buyers")
        .json(&json!({"groupId": group_id, "listId": list_id, "buyerIds": [bob, carol]}))
        .await
        .assert_status_ok();

    let view = app
        .server
        .get("/group-list")
        .add_query_param("listId", list_id)
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    let buyers: Vec<i64> = view["data"]["Buyers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["BuyerID"].as_i64().unwrap())
        .collect();
    assert_eq!(buyers, vec![bob, carol]);

    let plans = app
        .server
        .get("/group/plans")
        .add_query_param("groupId", group_id)
        .add_query_param("month", 11)
        .add_query_param("year", 2024)
        .await
        .json::<Value>();
    assert_eq!(plans["data"].as_array().unwrap().len(), 1);
    assert_eq!(plans["data"][0]["ListID"].as_i64(), Some(list_id));
    assert_eq!(plans["data"][0]["Buyers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_buyer_replacement_keeps_previous_buyers() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let milk = app.create_item("Milk").await;
    let group_id = app.create_group(admin, "Flatmates").await;
    let list_id = app.create_list(admin, "2024-11-02", &[(milk, 1)]).await;

    app.server
        .post("/group-list/share")
        .json(&json!({"listId": list_id, "groupId": group_id, "userId": admin}))
        .await
        .assert_status_ok();

    app.server
        .post("/group-list/buyers")
        .json(&json!({"groupId": group_id, "listId": list_id, "buyerIds": [admin, 4040]}))
        .await
        .assert_status(StatusCode::CONFLICT);

    let view = app
        .server
        .get("/group-list")
        .add_query_param("listId", list_id)
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    assert_eq!(view["data"]["Buyers"][0]["BuyerID"].as_i64(), Some(admin));
}

#[tokio::test]
async fn removing_a_member_drops_their_buyer_rows() {
    let app = spawn_app();
    let admin = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let milk = app.create_item("Milk").await;
    let group_id = app.create_group(admin, "Flatmates").await;
    app.server
        .post("/group/members")
        .json(&json!({"groupId": group_id, "memberIds": [bob]}))
        .await
        .assert_status_ok();

    let list_id = app.create_list(admin, "2024-11-02", &[(milk, 1)]).await;
    app.server
        .post("/group-list/buyers")
        .json(&json!({"groupId": group_id, "listId": list_id, "buyerIds": [admin, bob]}))
        .await
        .assert_status_ok();

    app.server
        .delete("/group/member")
        .json(&json!({"groupId": group_id, "memberId": bob}))
        .await
        .assert_status_ok();

    let view = app
        .server
        .get("/group-list")
        .add_query_param("listId", list_id)
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    assert_eq!(view["data"]["Buyers"], json!([{"BuyerID": admin, "Username": "alice"}]));

    let details = app
        .server
        .get("/group/details")
        .add_query_param("groupId", group_id)
        .await
        .json::<Value>();
    assert_eq!(details["data"]["Members"].as_array().unwrap().len(), 1);

    app.server
        .delete("/group/member")
        .json(&json!({"groupId": group_id}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
