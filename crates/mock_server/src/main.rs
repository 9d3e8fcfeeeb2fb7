use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{User, UserId},
    error::{ApiError, ErrorCode},
    protocol::users_route,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{user_route_pattern, ApiContext};
use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let api = if settings.seed_demo_users {
        ApiContext::with_users(api::seed_users())
    } else {
        ApiContext::default()
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr = settings.socket_addr()?;
    info!(%addr, seeded = settings.seed_demo_users, "mock users api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on ctrl-c. If the handler cannot be installed the server keeps running.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to install ctrl-c handler; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(users_route(), get(http_list_users))
        .route(
            user_route_pattern(),
            get(http_get_user).put(http_put_user).delete(http_delete_user),
        )
        .with_state(state)
}

fn error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(err))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(api::list_users(&state.api).await)
}

async fn http_get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    api::get_user(&state.api, UserId(user_id))
        .await
        .map(Json)
        .map_err(error_response)
}

async fn http_put_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    payload: Result<Json<User>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(user) = payload.map_err(|rejection| {
        warn!(user_id, %rejection, "rejected user update payload");
        error_response(ApiError::new(ErrorCode::Validation, rejection.body_text()))
    })?;
    let stored = api::replace_user(&state.api, UserId(user_id), user)
        .await
        .map_err(error_response)?;
    info!(user_id, "user replaced");
    Ok(Json(stored))
}

async fn http_delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    api::delete_user(&state.api, UserId(user_id))
        .await
        .map_err(error_response)?;
    info!(user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
