use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

pub mod dashboard;
pub mod export;
pub mod upload;

pub use dashboard::*;
pub use export::*;
pub use upload::*;

/// Standard envelope for successful JSON responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn json_error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}
