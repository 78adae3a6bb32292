// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::checkin::checkin,
    ),
    components(
        schemas(
            models::checkin::CheckinPayload,
            models::checkin::CheckinResponse,
            models::checkin::CheckinStatus,
        )
    ),
    tags(
        (name = "Check-in", description = "Check-in no local e envio do comprovativo")
    )
)]
pub struct ApiDoc;
