//! Shared application state for the web server.

use standings_core::{Ranker, Standings};
use standings_ocr::{OcrBackend, ScoreSheetPipeline, TextRecognizer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::{Config, ConfigError, OcrBackendKind, OcrSettings};
use crate::gate::RunGate;

pub type SharedRecognizer = Arc<dyn OcrBackend>;

/// Shared state injected into every handler.
pub struct AppState {
    pub ranker: Ranker,
    pub pipeline: ScoreSheetPipeline<SharedRecognizer>,
    pub gate: RunGate,
    pub output_path: PathBuf,
    /// The most recently completed run.
    pub last: RwLock<Option<Standings>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(ranker: Ranker, recognizer: SharedRecognizer, output_path: PathBuf) -> Self {
        Self {
            ranker,
            pipeline: ScoreSheetPipeline::new(recognizer),
            gate: RunGate::new(),
            output_path,
            last: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let ranker = Ranker::new(config.ranking.clone(), config.awards.clone());
        let recognizer = build_recognizer(&config.ocr)?;
        Ok(Self::new(ranker, recognizer, config.server.output_path.clone()))
    }
}

fn build_recognizer(settings: &OcrSettings) -> Result<SharedRecognizer, ConfigError> {
    match settings.backend {
        OcrBackendKind::Text => Ok(Arc::new(TextRecognizer)),
        #[cfg(feature = "tesseract")]
        OcrBackendKind::Tesseract => Ok(Arc::new(standings_ocr::TesseractRecognizer::new(
            settings.tesseract_data_path.clone(),
            &settings.tesseract_lang,
        ))),
        #[cfg(not(feature = "tesseract"))]
        OcrBackendKind::Tesseract => Err(ConfigError::Ocr(standings_ocr::OcrError::NotAvailable)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_text_backend() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(!state.gate.is_busy());
        assert_eq!(state.output_path, PathBuf::from("standings.csv"));
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn tesseract_without_feature_is_a_config_error() {
        let mut config = Config::default();
        config.ocr.backend = OcrBackendKind::Tesseract;
        assert!(matches!(AppState::from_config(&config), Err(ConfigError::Ocr(_))));
    }
}
