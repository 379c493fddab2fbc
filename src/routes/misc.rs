use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value as JsonValue;
use tracing::error;

use crate::{
    AppState, handlers,
    models::common::{ApiResponse, ErrorMessage},
    services::event_log,
};

#[utoipa::path(
    get,
    path = "/ping",
    tag = "various",
    responses(
        (status = 200, description = "Liveness check", body = ApiResponse)
    )
)]
pub async fn ping() -> Json<ApiResponse> {
    Json(ApiResponse::ok("pong"))
}

#[utoipa::path(
    post,
    path = "/localCallbackExample",
    tag = "various",
    request_body = crate::models::webhook::CallbackEvent,
    responses(
        (status = 200, description = "Callback accepted", body = ApiResponse),
        (status = 500, description = "Handler error", body = ErrorMessage)
    )
)]
pub async fn local_callback(
    State(state): State<AppState>,
    Json(payload): Json<JsonValue>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ErrorMessage>)> {
    match handlers::process_callback(&state, &payload).await {
        Ok(outcome) => Ok(Json(ApiResponse::ok(outcome.message()))),
        Err(err) => {
            error!("Callback handler failed: {err}");
            event_log::append_error(&state.cfg, &err.to_string()).await;
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorMessage::new(err.to_string())),
            ))
        }
    }
}
