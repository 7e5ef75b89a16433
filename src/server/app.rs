use std::sync::Arc;

use anyhow::Context;
use axum::body::Body;
use axum::extract::FromRef;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::{routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes::{self, category_router, questions_router, quizzes_router, ApiError};
use crate::configuration::ApplicationSettings;
use crate::db::Store;
use crate::trivia::quiz::RandomSource;

/// Number of questions on a listing or search page.
#[derive(Clone, Copy, Debug)]
pub struct PageSize(pub usize);

#[derive(FromRef, Clone)]
pub struct AppState {
    store: Store,
    random: Arc<dyn RandomSource>,
    page_size: PageSize,
}

impl AppState {
    pub fn new(store: Store, random: Arc<dyn RandomSource>, page_size: usize) -> AppState {
        AppState {
            store,
            random,
            page_size: PageSize(page_size),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router())
        .merge(questions_router())
        .merge(quizzes_router())
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(settings: &ApplicationSettings, state: AppState) -> anyhow::Result<()> {
    let addr = settings.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn metrics() -> routes::ApiResult<Response> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|err| {
        tracing::error!("Cannot encode metrics: {err}");
        ApiError::Internal
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|err| {
            tracing::error!("Cannot build metrics response: {err}");
            ApiError::Internal
        })
}
