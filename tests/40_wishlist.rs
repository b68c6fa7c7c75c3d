mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn duplicate_add_conflicts_and_keeps_one_entry() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    let product = app.insert_product("Scarf", 3, "Apparel").await?;
    let (_, token) = app.user_with_token("shopper@example.com").await?;

    let res = app
        .post("/api/wishlist", Some(&token), json!({ "product_id": product }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()["product_id"], product);
    assert_eq!(res.json()["product"]["name"], "Scarf");

    let res = app
        .post("/api/wishlist", Some(&token), json!({ "product_id": product }))
        .await?;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.json()["error"], "Item already in wishlist");

    let list = app.get("/api/wishlist", Some(&token)).await?.json();
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn rejects_missing_or_unknown_product() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    let (_, token) = app.user_with_token("shopper@example.com").await?;

    let res = app.post("/api/wishlist", Some(&token), json!({})).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "Product ID is required");

    let res = app
        .post("/api/wishlist", Some(&token), json!({ "product_id": 999 }))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn removes_by_product_id() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    let product = app.insert_product("Scarf", 3, "Apparel").await?;
    let (_, token) = app.user_with_token("shopper@example.com").await?;

    let res = app.delete(&format!("/api/wishlist/{product}"), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["error"], "Item not found in wishlist");

    app.post("/api/wishlist", Some(&token), json!({ "product_id": product }))
        .await?;
    let res = app.delete(&format!("/api/wishlist/{product}"), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"], "Item removed from wishlist");

    let list = app.get("/api/wishlist", Some(&token)).await?.json();
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn wishlists_are_per_user() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    let product = app.insert_product("Scarf", 3, "Apparel").await?;
    let (_, first) = app.user_with_token("first@example.com").await?;
    let (_, second) = app.user_with_token("second@example.com").await?;

    app.post("/api/wishlist", Some(&first), json!({ "product_id": product }))
        .await?;
    let res = app
        .post("/api/wishlist", Some(&second), json!({ "product_id": product }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app.delete(&format!("/api/wishlist/{product}"), Some(&second)).await?;
    assert_eq!(res.status, StatusCode::OK);

    let list = app.get("/api/wishlist", Some(&first)).await?.json();
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    Ok(())
}
