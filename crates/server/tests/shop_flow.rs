mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::{build_app, create_item, send, user_token};

#[tokio::test]
async fn test_widget_rating_example() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "A", "a@example.com", "seller").await?;
    let buyer = user_token(&app, "B", "b@example.com", "customer").await?;

    let widget = create_item(&app, &seller, "Widget", 9.99).await?;

    let uri = format!("/api/items/rating/{}", widget);
    let resp = send(&app, "POST", &uri, Some(&buyer), Some(json!({ "rating": 5 }))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["item_rating"]["rating"], 5.0);
    assert!(resp.body["item_rating"]["id"].is_i64());

    let resp = send(&app, "POST", &uri, Some(&buyer), Some(json!({ "rating": 5 }))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({ "status": "fail", "message": "user already rated this item" }));

    let resp = send(&app, "GET", &format!("/api/items/{}", widget), None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    let item = &resp.body["item"];
    assert_eq!(item["name"], "Widget");
    assert_eq!(item["price"], 9.99);
    assert_eq!(item["seller_name"], "A");
    assert_eq!(item["avg_rating"], 5.0);
    Ok(())
}

#[tokio::test]
async fn test_only_sellers_create_items() -> anyhow::Result<()> {
    let app = build_app().await?;
    let customer = user_token(&app, "C", "c@example.com", "customer").await?;

    let body = json!({ "name": "Nope", "price": 1.0 });
    let resp = send(&app, "POST", "/api/items", Some(&customer), Some(body.clone())).await?;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.body, json!({ "status": "fail", "message": "You have not access" }));

    let resp = send(&app, "POST", "/api/items", None, Some(body)).await?;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = send(&app, "GET", "/api/items", None, None).await?;
    assert_eq!(resp.body, json!({ "status": "success", "items": [] }));
    Ok(())
}

#[tokio::test]
async fn test_list_filters() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    for (name, price) in [("Cheap Widget", 5.0), ("Mid Widget", 10.0), ("Gadget", 15.0), ("Luxury", 20.0)] {
        create_item(&app, &seller, name, price).await?;
    }

    let resp = send(&app, "GET", "/api/items?price_gte=10", None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    let items = resp.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i["price"].as_f64().unwrap() >= 10.0));

    let resp = send(&app, "GET", "/api/items?price_gte=10&price_lte=15", None, None).await?;
    let names: Vec<_> = resp.body["items"].as_array().unwrap().iter().map(|i| i["name"].clone()).collect();
    assert_eq!(names, vec![json!("Mid Widget"), json!("Gadget")]);

    let resp = send(&app, "GET", "/api/items?search=widget", None, None).await?;
    assert_eq!(resp.body["items"].as_array().unwrap().len(), 2);

    let resp = send(&app, "GET", "/api/items?rating_gte=1", None, None).await?;
    assert!(resp.body["items"].as_array().unwrap().is_empty());

    let resp = send(&app, "GET", "/api/items?price_gte=cheap", None, None).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["status"], "fail");
    Ok(())
}

#[tokio::test]
async fn test_get_unknown_item_is_zero_valued() -> anyhow::Result<()> {
    let app = build_app().await?;
    let resp = send(&app, "GET", "/api/items/4242", None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["item"]["id"], 0);
    assert_eq!(resp.body["item"]["name"], "");
    assert_eq!(resp.body["item"]["comments"], json!([]));

    let resp = send(&app, "GET", "/api/items/abc", None, None).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_delete_item() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    let keep = create_item(&app, &seller, "Keep", 1.0).await?;
    let gone = create_item(&app, &seller, "Gone", 1.0).await?;

    let resp = send(&app, "DELETE", "/api/items/9999", None, None).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({ "status": "fail", "message": "item not found" }));
    let resp = send(&app, "GET", "/api/items", None, None).await?;
    assert_eq!(resp.body["items"].as_array().unwrap().len(), 2);

    let resp = send(&app, "DELETE", &format!("/api/items/{}", gone), None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    let resp = send(&app, "GET", "/api/items", None, None).await?;
    let items = resp.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], keep);
    Ok(())
}

#[tokio::test]
async fn test_ordered_item_cannot_be_deleted() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    let buyer = user_token(&app, "B", "b@example.com", "customer").await?;
    let widget = create_item(&app, &seller, "Widget", 9.99).await?;

    let resp = send(&app, "POST", &format!("/api/items/{}/purchase", widget), Some(&buyer), None).await?;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = send(&app, "DELETE", &format!("/api/items/{}", widget), None, None).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({ "status": "fail", "message": "item has orders and cannot be deleted" }));

    let resp = send(&app, "GET", "/api/users/me/orders", Some(&buyer), None).await?;
    let orders = resp.body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "pending");

    let resp = send(&app, "GET", &format!("/api/items/{}", widget), None, None).await?;
    assert_eq!(resp.body["item"]["name"], "Widget");
    Ok(())
}

#[tokio::test]
async fn test_update_item_patch() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    let other = user_token(&app, "O", "o@example.com", "customer").await?;
    let id = create_item(&app, &seller, "Widget", 9.99).await?;
    let uri = format!("/api/items/{}", id);

    let resp = send(&app, "PUT", &uri, None, Some(json!({ "price": 1.0 }))).await?;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = send(&app, "PUT", &uri, Some(&seller), Some(json!({ "price": 0 }))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["item"]["price"], 0.0);
    assert_eq!(resp.body["item"]["name"], "Widget");

    // no ownership guard on update
    let resp = send(&app, "PUT", &uri, Some(&other), Some(json!({ "name": "Renamed" }))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["item"]["name"], "Renamed");
    assert_eq!(resp.body["item"]["price"], 0.0);

    let resp = send(&app, "PUT", "/api/items/9999", Some(&seller), Some(json!({ "name": "X" }))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "PUT", &uri, Some(&seller), Some(json!({ "price": -3 }))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_comments_show_in_detail() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    let buyer = user_token(&app, "B", "b@example.com", "customer").await?;
    let id = create_item(&app, &seller, "Widget", 2.0).await?;

    let uri = format!("/api/items/comment/{}", id);
    let resp = send(&app, "POST", &uri, Some(&buyer), Some(json!({ "comment": "great" }))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["item_comment"]["comment"], "great");

    let resp = send(&app, "POST", "/api/items/comment/9999", Some(&buyer), Some(json!({ "comment": "x" }))).await?;
    assert_eq!(resp.body, json!({ "status": "fail", "message": "item not found" }));

    let resp = send(&app, "GET", &format!("/api/items/{}", id), None, None).await?;
    assert_eq!(resp.body["item"]["comments"], json!([{ "comment": "great", "email": "b@example.com" }]));
    Ok(())
}

#[tokio::test]
async fn test_purchase_and_ship() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "A", "a@example.com", "seller").await?;
    let customer = user_token(&app, "B", "b@example.com", "customer").await?;
    let widget = create_item(&app, &seller, "Widget", 9.99).await?;

    let resp = send(&app, "POST", &format!("/api/items/{}/purchase", widget), Some(&seller), None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["order"]["status"], "pending");
    let order_id = resp.body["order"]["id"].as_i64().unwrap();

    let status_uri = format!("/api/order/{}/status", order_id);
    let resp = send(&app, "POST", &status_uri, Some(&customer), Some(json!({ "status": "shipped" }))).await?;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = send(&app, "POST", &status_uri, Some(&seller), Some(json!({ "status": "shipped" }))).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["order"], json!({ "id": order_id, "status": "shipped" }));

    let resp = send(&app, "GET", "/api/users/me/orders", Some(&seller), None).await?;
    assert_eq!(resp.body["orders"][0]["status"], "shipped");

    let resp = send(&app, "POST", "/api/order/9999/status", Some(&seller), Some(json!({ "status": "x" }))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = send(&app, "POST", "/api/items/9999/purchase", Some(&customer), None).await?;
    assert_eq!(resp.body, json!({ "status": "fail", "message": "item not found" }));
    Ok(())
}

#[tokio::test]
async fn test_cancel_requires_order_owner() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "A", "a@example.com", "seller").await?;
    let buyer = user_token(&app, "B", "b@example.com", "customer").await?;
    let widget = create_item(&app, &seller, "Widget", 9.99).await?;

    let resp = send(&app, "POST", &format!("/api/items/{}/purchase", widget), Some(&buyer), None).await?;
    let order_id = resp.body["order"]["id"].as_i64().unwrap();
    let cancel_uri = format!("/api/users/1/orders/{}/cancel", order_id);

    let resp = send(&app, "POST", &cancel_uri, Some(&seller), None).await?;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = send(&app, "POST", "/api/users/1/orders/9999/cancel", Some(&buyer), None).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["message"], "order not found");

    let resp = send(&app, "POST", &cancel_uri, None, None).await?;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = send(&app, "POST", &cancel_uri, Some(&buyer), None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["order"], json!({ "id": order_id, "status": "canceled" }));
    Ok(())
}

#[tokio::test]
async fn test_health_and_docs() -> anyhow::Result<()> {
    let app = build_app().await?;
    let resp = send(&app, "GET", "/api/health-checker", None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "success");

    let resp = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body["paths"]["/api/items"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_fail_envelope() -> anyhow::Result<()> {
    let app = build_app().await?;
    let seller = user_token(&app, "S", "s@example.com", "seller").await?;
    let resp = send(&app, "POST", "/api/items", Some(&seller), Some(json!({ "name": "No price" }))).await?;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["status"], "fail");
    assert!(resp.body["message"].as_str().unwrap().contains("price"));
    Ok(())
}
