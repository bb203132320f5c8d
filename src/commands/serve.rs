use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::field_coords::FieldCoordinates;
use crate::web;

pub async fn handle_serve(host: String, port: u16, fields: Option<PathBuf>) -> Result<()> {
    let coords = FieldCoordinates::load(fields.as_deref())?;
    info!("Loaded {} field coordinates", coords.len());

    web::start_web_server(host, port, coords).await
}
