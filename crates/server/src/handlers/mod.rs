pub mod download;
pub mod upload;

use axum::{extract::State, response::Html};

use crate::pages;
use crate::state::SharedState;

/// GET / — upload form.
pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(pages::index(state.gate.is_busy()))
}
