pub mod checkin;

use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc};

// Todas as rotas da aplicação
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(checkin::form_page).post(checkin::submit_form))
        .route("/api/checkin", post(checkin::checkin))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(app_state)
}
