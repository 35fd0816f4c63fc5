use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{header, StatusCode};

use crate::models::{AppState, PriceResponse};
use crate::quote_service::{self, Outcome};

/// GET /cotacao
///
/// Статус ответа зависит только от получения котировки. Ошибки сохранения
/// видны лишь в логах; тело после них пишется, если включено `respond-on-persist-failure`
pub async fn cotacao(State(state): State<AppState>) -> Response {
    match quote_service::process(&state).await {
        Outcome::FetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Outcome::Fetched {
            quote,
            persist_error: None,
        } => (StatusCode::OK, Json(PriceResponse::from(&quote))).into_response(),
        Outcome::Fetched {
            quote,
            persist_error: Some(_),
        } => {
            if state.pipeline.respond_on_persist_failure {
                (StatusCode::OK, Json(PriceResponse::from(&quote))).into_response()
            } else {
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                )
                    .into_response()
            }
        }
    }
}
