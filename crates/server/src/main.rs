use standings_server::{config::Config, router, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.server.log_format)?;

    let state = AppState::from_config(&config)?;
    let app = router::build_router(state, config.server.max_upload_bytes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        output = %config.server.output_path.display(),
        backend = ?config.ocr.backend,
        "standings server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
