use serde_json::{json, Value};
use vercel_runtime::{Body, Response, StatusCode};

use crate::error::AppError;
use crate::http::cors::add_cors;

pub fn error_response(err: &AppError) -> (StatusCode, Value) {
    match err {
        AppError::Validation(details) => (
            StatusCode::BAD_REQUEST,
            json!({"error": "Invalid request body", "details": details}),
        ),
        AppError::Upstream(_) | AppError::Config(_) | AppError::Other(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": err.to_string()}),
        ),
    }
}

pub fn json_response<T: serde::Serialize>(status: StatusCode, value: &T) -> anyhow::Result<Response<Body>> {
    let resp = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(value)?.into())?;
    Ok(add_cors(resp))
}
