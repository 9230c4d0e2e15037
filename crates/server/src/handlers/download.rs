use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use standings_core::Standings;

use crate::error::AppError;
use crate::pages;
use crate::state::SharedState;

/// GET /download — link to the finished table.
pub async fn download_page() -> Html<String> {
    Html(pages::download())
}

/// GET /getfile — the standings CSV as an attachment.
pub async fn get_file(State(state): State<SharedState>) -> Result<Response, AppError> {
    let bytes = match tokio::fs::read(&state.output_path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::NoResult),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let filename = state
        .output_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("standings.csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/standings — the last completed run as JSON.
pub async fn api_standings(State(state): State<SharedState>) -> Result<Json<Standings>, AppError> {
    state
        .last
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or(AppError::NoResult)
}
