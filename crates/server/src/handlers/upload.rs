//! POST /upload — read the screenshots, rank them, store the table.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use standings_core::Standings;
use uuid::Uuid;

use crate::error::AppError;
use crate::pages;
use crate::state::SharedState;

/// Multipart field carrying the screenshots.
const FILE_FIELD: &str = "file";

pub async fn upload(State(state): State<SharedState>, multipart: Multipart) -> Result<Response, AppError> {
    let Some(_permit) = state.gate.try_enter() else {
        tracing::warn!("upload refused: a ranking run is already in progress");
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Html(pages::busy())).into_response());
    };

    let uploads = collect_files(multipart).await?;
    if uploads.is_empty() {
        return Err(AppError::NoFilePart);
    }

    run(state, uploads).await?;
    Ok(Redirect::to("/download").into_response())
}

async fn collect_files(mut multipart: Multipart) -> Result<Vec<Bytes>, AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let data = field.bytes().await?;
        // Browsers send an empty part when nothing was selected.
        if !data.is_empty() {
            uploads.push(data);
        }
    }
    Ok(uploads)
}

#[tracing::instrument(name = "ranking_run", skip_all, fields(run_id = %Uuid::new_v4(), uploads = uploads.len()))]
async fn run(state: SharedState, uploads: Vec<Bytes>) -> Result<(), AppError> {
    let worker = state.clone();
    let sheets = tokio::task::spawn_blocking(move || worker.pipeline.process_batch(&uploads)).await??;

    let readings = standings_ocr::readings(sheets);
    let standings = state.ranker.rank(&readings);
    log_summary(&standings);

    let entries = standings.entries.clone();
    let path = state.output_path.clone();
    tokio::task::spawn_blocking(move || standings_export::write_table_to_path(&entries, &path)).await??;

    *state.last.write().await = Some(standings);
    Ok(())
}

fn log_summary(standings: &Standings) {
    tracing::info!(
        entries = standings.entries.len(),
        reference_mean = ?standings.reference_mean,
        flagged = standings.flagged,
        corrected = ?standings.correction.map(|c| c.ingestion_index),
        "standings computed"
    );
}
