// src/handlers/checkin.rs

use askama::Template;
use axum::{
    extract::State,
    response::Html,
    Form, Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::checkin::{CheckinForm, CheckinPayload, CheckinResponse},
};

#[derive(Template, Default)]
#[template(path = "checkin.html")]
pub struct CheckinPage {
    pub registo: String,
    pub email: String,
    pub resultado: String,
}

// GET /
pub async fn form_page() -> Result<Html<String>, AppError> {
    Ok(Html(CheckinPage::default().render()?))
}

// POST /
pub async fn submit_form(
    State(app_state): State<AppState>,
    Form(form): Form<CheckinForm>,
) -> Result<Html<String>, AppError> {
    let outcome = app_state
        .checkin_service
        .checkin(&form.email, &form.registo)
        .await?;

    let page = CheckinPage {
        registo: form.registo,
        email: form.email,
        resultado: outcome.message(),
    };

    Ok(Html(page.render()?))
}

// POST /api/checkin
#[utoipa::path(
    post,
    path = "/api/checkin",
    tag = "Check-in",
    request_body = CheckinPayload,
    responses(
        (status = 200, description = "Estado final do check-in (enviado, e-mail inválido ou falha no envio)", body = CheckinResponse),
        (status = 500, description = "Falha ao gerar o comprovativo")
    )
)]
pub async fn checkin(
    State(app_state): State<AppState>,
    Json(payload): Json<CheckinPayload>,
) -> Result<Json<CheckinResponse>, AppError> {
    let outcome = app_state
        .checkin_service
        .checkin(&payload.email, &payload.registo)
        .await?;

    Ok(Json(outcome.into()))
}
