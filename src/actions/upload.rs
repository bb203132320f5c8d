use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

use crate::ingest::{IngestError, ingest_workbook};
use crate::records::{Dataset, SkippedRow};
use crate::web::AppState;

use super::{DataResponse, json_error};

/// What the user sees after an upload: how much of the file was usable.
#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub records: usize,
    pub skipped: usize,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Ingest an uploaded `.xlsx` workbook and replace the dataset wholesale.
///
/// A header missing required columns rejects the whole upload with 422 and
/// leaves the previous dataset in place. Malformed rows are dropped and
/// reported back per row.
pub async fn upload_workbook(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let bytes = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => match field.bytes().await {
                Ok(bytes) if !bytes.is_empty() => break bytes,
                Ok(_) => continue,
                Err(e) => {
                    return json_error(
                        StatusCode::BAD_REQUEST,
                        &format!("Failed to read uploaded file: {}", e),
                    )
                    .into_response();
                }
            },
            Ok(None) => {
                return json_error(StatusCode::BAD_REQUEST, "No file in upload").into_response();
            }
            Err(e) => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Malformed multipart request: {}", e),
                )
                .into_response();
            }
        }
    };

    match ingest_workbook(&bytes) {
        Ok(outcome) => {
            let summary = UploadSummary {
                records: outcome.records.len(),
                skipped: outcome.skipped.len(),
                skipped_rows: outcome.skipped.clone(),
            };
            info!(
                "upload ingested {} records ({} skipped)",
                summary.records, summary.skipped
            );
            *state.dataset.write().await = Some(Dataset::from_outcome(outcome));
            Json(DataResponse { data: summary }).into_response()
        }
        Err(e @ IngestError::MissingColumns(_)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()).into_response()
        }
        Err(e) => {
            error!("Failed to ingest upload: {}", e);
            json_error(
                StatusCode::BAD_REQUEST,
                &format!("Failed to ingest upload: {}", e),
            )
            .into_response()
        }
    }
}
