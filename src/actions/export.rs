use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use tracing::error;

use crate::export::export_workbook;
use crate::filter::apply_filter;
use crate::web::AppState;

use super::{FilterParams, json_error};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download the filtered rows as an `.xlsx` in the original column schema.
pub async fn export_filtered(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    let guard = state.dataset.read().await;
    let Some(dataset) = guard.as_ref() else {
        return json_error(StatusCode::NOT_FOUND, "No dataset uploaded yet").into_response();
    };

    let spec = params.into_spec();
    let filtered = apply_filter(&dataset.records, &spec);

    match export_workbook(&filtered) {
        Ok(bytes) => {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, XLSX_MIME.parse().unwrap());
            headers.insert(
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"startlog_filtered.xlsx\""
                    .parse()
                    .unwrap(),
            );
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) => {
            error!("Failed to build export workbook: {}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build export workbook",
            )
            .into_response()
        }
    }
}
