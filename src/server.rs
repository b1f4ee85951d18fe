use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde_json::json;

use crate::error::CicastError;
use crate::pipeline::InferencePipeline;
use crate::types::PipelineInput;

/// Builds the two-route service: a health check at `/` and the prediction
/// endpoint at `/predict`.
pub fn build_router(pipeline: Arc<InferencePipeline>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/predict", post(predict).with_state(pipeline))
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(pipeline: Arc<InferencePipeline>, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(pipeline)).await?;

    Ok(())
}

/// Liveness only: succeeds whenever the process is reachable, regardless of
/// request history.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "running" }))
}

async fn predict(
    State(pipeline): State<Arc<InferencePipeline>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    // Shape validation happens here so the caller gets a typed client error
    // rather than a bare extractor rejection.
    let input: PipelineInput = match serde_json::from_value(body) {
        Ok(input) => input,
        Err(err) => return error_response(&CicastError::InvalidInput(err.to_string())),
    };

    match pipeline.predict(&input) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(err) => {
            error!("Prediction failed for job '{}': {}", input.job_name, err);
            error_response(&err)
        }
    }
}

fn error_response(err: &CicastError) -> Response {
    let status = match err {
        CicastError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
