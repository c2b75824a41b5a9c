//! Integration tests for the labels resource

mod common;

use axum::http::StatusCode;
use common::{id_of, parse_json, TestApp, BASE_URL, TEST_USERNAME};
use serde_json::json;

#[tokio::test]
async fn create_label() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);

    let label = app.create_label(&token, "Label name").await;

    assert_eq!(label["name"], "Label name");
    assert!(label["id"].is_i64());
    assert!(label["createdAt"].is_string());
}

#[tokio::test]
async fn create_label_requires_auth() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (status, body) = app
        .request(
            "POST",
            &format!("{BASE_URL}/labels"),
            None,
            Some(json!({ "name": "Label name" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn create_label_with_blank_name() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);

    let (status, _) = app
        .request(
            "POST",
            &format!("{BASE_URL}/labels"),
            Some(&token),
            Some(json!({ "name": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_labels_is_open() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);
    let created = app.create_label(&token, "Label name").await;

    let (status, body) = app
        .request("GET", &format!("{BASE_URL}/labels"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(&body).as_array().unwrap().len(), 1);

    let (status, body) = app
        .request(
            "GET",
            &format!("{BASE_URL}/labels/{}", id_of(&created)),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(&body), created);
}

#[tokio::test]
async fn get_missing_label() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    let (status, body) = app
        .request("GET", &format!("{BASE_URL}/labels/9999"), None, None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8_lossy(&body).contains("Label not found"));
}

#[tokio::test]
async fn update_label() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);
    let created = app.create_label(&token, "Label name").await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("{BASE_URL}/labels/{}", id_of(&created)),
            Some(&token),
            Some(json!({ "name": "Renamed" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(&body)["name"], "Renamed");
}

#[tokio::test]
async fn delete_label() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);
    let created = app.create_label(&token, "Label name").await;

    let (status, body) = app
        .request(
            "DELETE",
            &format!("{BASE_URL}/labels/{}", id_of(&created)),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, _) = app
        .request(
            "GET",
            &format!("{BASE_URL}/labels/{}", id_of(&created)),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_label_attached_to_task() {
    let Some(app) = TestApp::spawn().await else {
        return;
    };

    app.register_user(TEST_USERNAME).await;
    let token = app.token_for(TEST_USERNAME);
    let task_status = app.create_status(&token, "New").await;
    let label = app.create_label(&token, "Label name").await;
    app.create_task(
        &token,
        json!({
            "name": "Task name",
            "taskStatusId": id_of(&task_status),
            "labelIds": [id_of(&label)]
        }),
    )
    .await;

    let (status, body) = app
        .request(
            "DELETE",
            &format!("{BASE_URL}/labels/{}", id_of(&label)),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(String::from_utf8_lossy(&body).contains("Cannot delete the label. Tasks have labels"));

    // the label is left in place
    let (_, body) = app
        .request("GET", &format!("{BASE_URL}/labels"), None, None)
        .await;
    assert_eq!(parse_json(&body).as_array().unwrap().len(), 1);
}
