use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::app_context::AppContext;
use crate::orchestrator::{handle_deployment_event, DeploymentOutcome, HandleError};
use crate::swap::SwapError;

pub fn router(app_context: AppContext) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/deployments", post(handle_deployment))
        .with_state(app_context)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn handle_deployment(
    State(app_context): State<AppContext>,
    Json(event): Json<serde_json::Value>,
) -> Result<Json<DeploymentOutcome>, ApiError> {
    let outcome = handle_deployment_event(
        app_context.registry.as_ref(),
        app_context.directory.as_ref(),
        app_context.config.as_ref(),
        &event,
    )
    .await
    .map_err(ApiError)?;

    Ok(Json(outcome))
}

struct ApiError(HandleError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            HandleError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
            HandleError::Swap { source, .. } => match source {
                // Misconfiguration on our side, not the backend's.
                SwapError::UnknownMetricType(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SwapError::Create { .. } => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::error!(
            "deployment_event_failed status={} error={}",
            status.as_u16(),
            self.0
        );
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
