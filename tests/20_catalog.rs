mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn lists_every_product_without_a_filter() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    app.insert_product("Mug", 5, "Home").await?;
    app.insert_product("Lamp", 2, "Home").await?;
    app.insert_product("Scarf", 9, "Apparel").await?;

    let res = app.get("/api/products", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(names(&res.json()), vec!["Mug", "Lamp", "Scarf"]);
    Ok(())
}

#[tokio::test]
async fn filters_by_category() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    app.insert_product("Mug", 5, "Home").await?;
    app.insert_product("Scarf", 9, "Apparel").await?;

    let res = app.get("/api/products?category=Apparel", None).await?;
    assert_eq!(names(&res.json()), vec!["Scarf"]);

    let res = app.get("/api/products?category=All", None).await?;
    assert_eq!(names(&res.json()).len(), 2);

    let res = app.get("/api/products?category=", None).await?;
    assert_eq!(names(&res.json()).len(), 2);

    let res = app.get("/api/products?category=Garden", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), Value::Array(vec![]));
    Ok(())
}

#[tokio::test]
async fn fetches_single_product() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    let id = app.insert_product("Mug", 5, "Home").await?;

    let res = app.get(&format!("/api/products/{id}"), None).await?;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Mug");
    assert_eq!(body["stock"], 5);
    assert_eq!(body["category"], "Home");
    assert_eq!(body["image_url"], Value::Null);
    assert!(body["date_added"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn unknown_product_is_not_found() -> Result<()> {
    let app = common::TestApp::spawn().await?;

    let res = app.get("/api/products/999", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.json()["error"], "Product not found");

    let res = app.get("/api/products/abc", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn image_urls_follow_host_header() -> Result<()> {
    let app = common::TestApp::spawn().await?;
    sqlx::query(
        "INSERT INTO products (name, price, stock, image_filename, category, date_added) \
         VALUES ('Mug', 9.99, 5, 'mug.png', 'Home', '2024-01-01T00:00:00Z')",
    )
    .execute(&app.pool)
    .await?;

    let request = Request::builder()
        .uri("/api/products")
        .header(header::HOST, "shop.example.com:8080")
        .body(Body::empty())?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json()[0]["image_url"],
        "http://shop.example.com:8080/uploads/mug.png"
    );

    let request = Request::builder()
        .uri("/api/products")
        .header(header::HOST, "evil.com/x")
        .body(Body::empty())?;
    let res = app.send(request).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "Invalid Host header");
    Ok(())
}
