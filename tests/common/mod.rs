#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

use storefront_api::config::AppConfig;
use storefront_api::database::DatabaseManager;
use storefront_api::services::user_service;
use storefront_api::{router, AppState};

const BOUNDARY: &str = "storefront-test-boundary";

/// Full router over a fresh SQLite file and upload directory.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let dir = tempfile::tempdir().context("failed to create temp dir")?;

        let mut config = AppConfig::development();
        config.database.url = format!("sqlite://{}", dir.path().join("store.db").display());
        config.api.upload_dir = dir.path().join("uploads");
        config.api.public_url = None;
        config.security.jwt_secret = "integration-test-secret".to_string();

        let pool = DatabaseManager::connect(&config.database).await?;
        let upload_dir = config.api.upload_dir.clone();
        let router = router(AppState::new(pool.clone(), config));

        Ok(Self {
            router,
            pool,
            upload_dir,
            _dir: dir,
        })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes().to_vec();
        Ok(TestResponse { status, body })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "localhost");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> Result<TestResponse> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// POST a multipart form; `image` is `(filename, bytes)`.
    pub async fn post_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        image: Option<(&str, &[u8])>,
    ) -> Result<TestResponse> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::HOST, "localhost")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body))?).await
    }

    /// Create an account directly through the service layer.
    pub async fn create_user(&self, email: &str, password: &str, is_admin: bool) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        let user = user_service::create_user(&mut conn, email, password, is_admin).await?;
        Ok(user.id)
    }

    pub async fn login(&self, email: &str, password: &str, is_admin: bool) -> Result<String> {
        let path = if is_admin { "/api/login/admin" } else { "/api/login/user" };
        let res = self
            .post(path, None, serde_json::json!({ "email": email, "password": password }))
            .await?;
        anyhow::ensure!(res.status == StatusCode::OK, "login failed: {}", res.json());
        res.json()["access_token"]
            .as_str()
            .map(str::to_string)
            .context("missing access_token")
    }

    /// Registered non-admin user plus a token for it.
    pub async fn user_with_token(&self, email: &str) -> Result<(i64, String)> {
        let id = self.create_user(email, "password123", false).await?;
        let token = self.login(email, "password123", false).await?;
        Ok((id, token))
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.create_user("admin@example.com", "admin-password", true).await?;
        self.login("admin@example.com", "admin-password", true).await
    }

    /// Insert a product row without going through the upload flow.
    pub async fn insert_product(&self, name: &str, stock: i64, category: &str) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO products (name, description, price, stock, image_filename, category, date_added) \
             VALUES (?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(name)
        .bind(format!("{name} description"))
        .bind(9.99_f64)
        .bind(stock)
        .bind(category)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }
}
