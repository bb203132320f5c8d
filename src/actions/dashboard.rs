use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::aggregate::aggregate;
use crate::filter::{FilterOptions, FilterSpec, apply_filter};
use crate::web::AppState;

use super::{DataResponse, json_error};

/// Query-string form of a [`FilterSpec`]. Multi-value dimensions arrive as
/// comma-separated lists, e.g. `?fields=Venlo,Terlet&date_from=2024-05-01`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub types: Option<String>,
    pub fields: Option<String>,
    pub registrations: Option<String>,
    pub methods: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterParams {
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec {
            aircraft_types: split_list(self.types),
            fields: split_list(self.fields),
            registrations: split_list(self.registrations),
            launch_methods: split_list(self.methods),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}

fn split_list(raw: Option<String>) -> Option<Vec<String>> {
    let raw = raw?;
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    (!values.is_empty()).then_some(values)
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    let guard = state.dataset.read().await;
    let Some(dataset) = guard.as_ref() else {
        return json_error(StatusCode::NOT_FOUND, "No dataset uploaded yet").into_response();
    };

    let spec = params.into_spec();
    let filtered = apply_filter(&dataset.records, &spec);
    let views = aggregate(filtered, &state.coords, Utc::now().date_naive());

    Json(DataResponse { data: views }).into_response()
}

pub async fn get_filter_options(State(state): State<AppState>) -> impl IntoResponse {
    let guard = state.dataset.read().await;
    let Some(dataset) = guard.as_ref() else {
        return json_error(StatusCode::NOT_FOUND, "No dataset uploaded yet").into_response();
    };

    let options = FilterOptions::from_records(&dataset.records);
    Json(DataResponse { data: options }).into_response()
}
