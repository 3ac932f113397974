mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::spawn_server;

#[tokio::test]
async fn test_list_includes_products_through_join() {
    let server = spawn_server(true).await;

    let response = server.client.get(server.url("/tags")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tags: Vec<Value> = response.json().await.unwrap();
    assert_eq!(tags.len(), 8);
    assert_eq!(tags[0]["tag_name"], "rock music");

    let product_ids: Vec<u64> = tags[0]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(product_ids, vec![3, 4]);
    assert!(tags[0]["products"][0].get("category_id").is_none());
}

#[tokio::test]
async fn test_missing_tag_is_404() {
    let server = spawn_server(true).await;
    let url = server.url("/tags/999");

    let get = server.client.get(&url).send().await.unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    let body: Value = get.json().await.unwrap();
    assert_eq!(body["message"], "Tag not found");

    let put = server
        .client
        .put(&url)
        .json(&json!({ "tag_name": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(put.status(), StatusCode::NOT_FOUND);

    let delete = server.client.delete(&url).send().await.unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_tag() {
    let server = spawn_server(false).await;

    let response = server
        .client
        .post(server.url("/tags"))
        .json(&json!({ "tag_name": "vintage" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let tag: Value = response.json().await.unwrap();
    assert_eq!(tag["tag_name"], "vintage");
    assert!(tag["id"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_without_name_is_400() {
    let server = spawn_server(false).await;

    let response = server
        .client
        .post(server.url("/tags"))
        .json(&json!({ "tag_name": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Failed to create tag"));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let server = spawn_server(false).await;

    let create = |name: &'static str| {
        server
            .client
            .post(server.url("/tags"))
            .json(&json!({ "tag_name": name }))
            .send()
    };
    let (first, second) = tokio::join!(create("summer"), create("winter"));
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);

    let first: Value = first.json().await.unwrap();
    let second: Value = second.json().await.unwrap();
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_rename_keeps_products() {
    let server = spawn_server(true).await;
    let url = server.url("/tags/1");

    let before: Value = server.client.get(&url).send().await.unwrap().json().await.unwrap();

    let response = server
        .client
        .put(&url)
        .json(&json!({ "tag_name": "X" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated, json!({ "id": 1, "tag_name": "X" }));

    let after: Value = server.client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(after["tag_name"], "X");
    assert_eq!(after["products"], before["products"]);
}

#[tokio::test]
async fn test_rename_without_name_is_400() {
    let server = spawn_server(true).await;

    let response = server
        .client
        .put(server.url("/tags/2"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_tag_detaches_products() {
    let server = spawn_server(true).await;

    let response = server.client.delete(server.url("/tags/6")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Tag deleted successfully");

    let gone = server.client.get(server.url("/tags/6")).send().await.unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    // Plain T-Shirt had white, gold and pop culture
    let tee: Value = server
        .client
        .get(server.url("/products/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = tee["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["tag_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["gold", "pop culture"]);
}

#[tokio::test]
async fn test_out_of_range_ids_are_404() {
    let server = spawn_server(true).await;

    for id in ["-1", "99999999999", "-99999999999999999999999"] {
        let url = server.url(&format!("/tags/{id}"));

        let get = server.client.get(&url).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::NOT_FOUND, "GET /tags/{id}");

        let delete = server.client.delete(&url).send().await.unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND, "DELETE /tags/{id}");
    }

    let products = server.client.get(server.url("/products/4294967297")).send().await.unwrap();
    assert_eq!(products.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let server = spawn_server(true).await;

    let response = server.client.get(server.url("/tags/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
