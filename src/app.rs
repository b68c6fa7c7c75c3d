use anyhow::Context;
use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts},
    http::{header, request::Parts, HeaderValue, Method},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::{AppConfig, SecurityConfig};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::handlers;
use crate::services::uploads;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

/// Absolute base URL for links in responses: `PUBLIC_URL` when configured,
/// otherwise `http://` plus the request's `Host`.
#[derive(Debug, Clone)]
pub struct BaseUrl(pub Url);

#[async_trait]
impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(url) = state
            .config
            .api
            .public_url
            .as_deref()
            .and_then(|u| Url::parse(u).ok())
        {
            return Ok(BaseUrl(url));
        }

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| format!("localhost:{}", state.config.api.port));

        host_base_url(&host)
            .map(BaseUrl)
            .ok_or_else(|| ApiError::bad_request("Invalid Host header"))
    }
}

/// `http://<host>` for a bare host with optional port. Anything that would
/// add a path, query, fragment or credentials is refused.
fn host_base_url(host: &str) -> Option<Url> {
    let url = Url::parse(&format!("http://{}", host)).ok()?;
    let bare = url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none()
        && url.host_str().is_some_and(|h| !h.is_empty());
    bare.then_some(url)
}

pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.config.api.upload_dir);
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    Router::new()
        .merge(handlers::public::routes())
        .merge(handlers::protected::routes(state.clone()))
        .merge(handlers::elevated::routes(state.clone()))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    // No allowed origins means no CORS headers at all.
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let allow_origin = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(security.cors_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| warn!("Ignoring invalid CORS origin: {}", origin))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storefront_api=debug,tower_http=info"));
    // A second init (tests, CLI re-entry) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Connect the store, prepare the upload directory and serve until shutdown.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting storefront API in {:?} mode", config.environment);
    for setting in config.insecure_defaults() {
        warn!("{} is using its insecure built-in default; set it before production use", setting);
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open database")?;
    uploads::ensure_upload_dir(&config.api.upload_dir)
        .await
        .with_context(|| format!("failed to create {}", config.api.upload_dir.display()))?;

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Storefront API listening on http://{}", bind_addr);

    axum::serve(listener, router(AppState::new(pool, config))).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_header_becomes_base_url() {
        let url = host_base_url("shop.example.com:8080").unwrap();
        assert_eq!(url.as_str(), "http://shop.example.com:8080/");
        assert!(host_base_url("localhost").is_some());
    }

    #[test]
    fn host_header_cannot_inject_path_or_credentials() {
        for host in ["evil.com/x", "evil.com?x=1", "evil.com#frag", "user@evil.com", ""] {
            assert!(host_base_url(host).is_none(), "accepted {host:?}");
        }
    }
}
