//! Axum router — maps URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{
    download::{api_standings, download_page, get_file},
    index,
    upload::upload,
};
use crate::state::{AppState, SharedState};

/// Build the full router. Request bodies above `max_upload_bytes` are refused.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    routes(Arc::new(state), max_upload_bytes)
}

fn routes(shared: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/download", get(download_page))
        .route("/getfile", get(get_file))
        .route("/api/standings", get(api_standings))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use standings_core::Ranker;
    use standings_ocr::TextRecognizer;
    use tower::ServiceExt;

    const BOUNDARY: &str = "standings-test-boundary";

    struct Harness {
        state: SharedState,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let state = AppState::new(
                Ranker::default(),
                Arc::new(TextRecognizer),
                dir.path().join("standings.csv"),
            );
            Self { state: Arc::new(state), _dir: dir }
        }

        async fn send(&self, req: Request<Body>) -> Response {
            routes(self.state.clone(), 1024 * 1024).oneshot(req).await.unwrap()
        }

        async fn get(&self, uri: &str) -> Response {
            self.send(Request::get(uri).body(Body::empty()).unwrap()).await
        }

        async fn upload(&self, parts: &[(&str, &str)]) -> Response {
            let mut body = String::new();
            for (i, (name, content)) in parts.iter().enumerate() {
                body.push_str(&format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"shot{i}.txt\"\r\n\
                     Content-Type: text/plain\r\n\r\n{content}\r\n"
                ));
            }
            body.push_str(&format!("--{BOUNDARY}--\r\n"));

            let req = Request::post("/upload")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
                .body(Body::from(body))
                .unwrap();
            self.send(req).await
        }
    }

    async fn body_text(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ── upload → download ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn upload_ranks_and_redirects() {
        let h = Harness::new();
        let res = h.upload(&[("file", "ann 5000\nbo 4800"), ("file", "cy 99999\ndee 4700")]).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/download");

        let csv = body_text(h.get("/getfile").await).await;
        assert_eq!(
            csv,
            "player,points,position,award\nann,5000,1,100\nbo,4800,2,90\ncy,333,3,82\ndee,4700,4,75\n"
        );
        assert!(!h.state.gate.is_busy());
    }

    #[tokio::test]
    async fn getfile_is_an_attachment() {
        let h = Harness::new();
        h.upload(&[("file", "ann 5000")]).await;
        let res = h.get("/getfile").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"standings.csv\""
        );
    }

    #[tokio::test]
    async fn api_returns_last_run() {
        let h = Harness::new();
        h.upload(&[("file", "ann 5000\nbo 4800\ncy 99999\ndee 4700")]).await;

        let res = h.get("/api/standings").await;
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(json["flagged"], 1);
        assert_eq!(json["entries"][2]["player"], "cy");
        assert_eq!(json["entries"][2]["points"], 333.0);
        assert_eq!(json["entries"][2]["position"], 3);
    }

    #[tokio::test]
    async fn unreadable_scores_still_produce_a_table() {
        let h = Harness::new();
        h.upload(&[("file", "ann ???\nbo")]).await;
        let csv = body_text(h.get("/getfile").await).await;
        assert_eq!(csv, "player,points,position,award\nann ???,0,1,100\nbo,0,2,90\n");
    }

    // ── rejections ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_file_part_is_bad_request() {
        let h = Harness::new();
        let res = h.upload(&[("other", "ann 5000")]).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(res).await, "No file part in the request.");
        assert!(!h.state.gate.is_busy());
    }

    #[tokio::test]
    async fn busy_gate_refuses_upload() {
        let h = Harness::new();
        let permit = h.state.gate.try_enter().unwrap();

        let res = h.upload(&[("file", "ann 5000")]).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body_text(res).await.contains("Another upload"));

        let index = body_text(h.get("/").await).await;
        assert!(index.contains("in progress"));

        drop(permit);
        let res = h.upload(&[("file", "ann 5000")]).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn failed_run_shows_error_page_and_releases_gate() {
        let h = Harness::new();
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.bin\"\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        let req = Request::post("/upload")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap();

        let res = h.send(req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(res).await.contains("Something went wrong"));
        assert!(!h.state.gate.is_busy());
    }

    #[tokio::test]
    async fn nothing_to_download_before_first_run() {
        let h = Harness::new();
        assert_eq!(h.get("/getfile").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(h.get("/api/standings").await.status(), StatusCode::NOT_FOUND);
    }

    // ── pages ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn index_and_download_pages_render() {
        let h = Harness::new();
        let index = body_text(h.get("/").await).await;
        assert!(index.contains("action=\"/upload\""));
        assert!(!index.contains("in progress"));

        let download = body_text(h.get("/download").await).await;
        assert!(download.contains("href=\"/getfile\""));
    }
}
