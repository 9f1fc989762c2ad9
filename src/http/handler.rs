use serde_json::{json, Value};
use vercel_runtime::{Body, Request, Response, StatusCode};

use crate::{
    clients::CompletionProvider,
    error::AppError,
    http::{
        cors::add_cors,
        response::{error_response, json_response},
    },
    models::story::ValidationErrors,
    services::story::generate_story,
};

/// Serves `POST /api/generate-story`.
pub async fn handle(req: Request, provider: &dyn CompletionProvider) -> anyhow::Result<Response<Body>> {
    match req.method().as_str() {
        "POST" => {}
        "OPTIONS" => {
            let resp = Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Body::Empty)?;
            return Ok(add_cors(resp));
        }
        other => {
            tracing::debug!(method = other, "rejecting method");
            let mut resp = json_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &json!({"error": "Method not allowed"}),
            )?;
            if let Ok(allow) = "POST, OPTIONS".parse() {
                resp.headers_mut().insert("Allow", allow);
            }
            return Ok(resp);
        }
    }

    let result = match parse_payload(req.body()) {
        Ok(payload) => generate_story(provider, &payload).await,
        Err(errors) => Err(AppError::Validation(errors)),
    };

    match result {
        Ok(story) => json_response(StatusCode::OK, &json!({ "story": story })),
        Err(err) => {
            match &err {
                AppError::Validation(details) => tracing::info!(%details, "rejected story request"),
                other => tracing::error!(error = %other, "story generation failed"),
            }
            let (status, body) = error_response(&err);
            json_response(status, &body)
        }
    }
}

fn parse_payload(bytes: &[u8]) -> Result<Value, ValidationErrors> {
    if bytes.is_empty() {
        return Err(ValidationErrors::form("Request body is empty"));
    }
    serde_json::from_slice(bytes).map_err(|e| ValidationErrors::form(format!("Invalid JSON: {e}")))
}
