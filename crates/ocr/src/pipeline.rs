use sha2::{Digest, Sha256};
use standings_core::RawReading;
use thiserror::Error;

use crate::extract::{extract_rows, ScoreRow};
use crate::preprocess;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image preprocessing failed for upload {index}: {source}")]
    Preprocess {
        index: usize,
        #[source]
        source: preprocess::PreprocessError,
    },
    #[error("OCR recognition failed for upload {index}: {source}")]
    Ocr {
        index: usize,
        #[source]
        source: OcrError,
    },
}

/// The rows read off a single uploaded screenshot.
#[derive(Debug, Clone)]
pub struct ScoreSheet {
    /// SHA-256 hex digest of the uploaded bytes.
    pub hash_hex: String,
    /// Raw OCR text output.
    pub ocr_text: String,
    pub rows: Vec<ScoreRow>,
}

/// Orchestrates: hash → preprocess → OCR → row extraction.
pub struct ScoreSheetPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ScoreSheetPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Read one upload. `index` is its position in the request, for errors.
    pub fn process_bytes(&self, index: usize, data: &[u8]) -> Result<ScoreSheet, PipelineError> {
        let hash_hex = sha256_hex(data);

        let recognized = if self.recognizer.needs_image() {
            let image_bytes = preprocess::prepare_for_ocr(data)
                .map_err(|source| PipelineError::Preprocess { index, source })?;
            self.recognizer.recognize(&image_bytes)
        } else {
            self.recognizer.recognize(data)
        };
        let ocr_text = recognized.map_err(|source| PipelineError::Ocr { index, source })?;

        let rows = extract_rows(&ocr_text);
        tracing::debug!(index, hash = %hash_hex, rows = rows.len(), "screenshot read");

        Ok(ScoreSheet { hash_hex, ocr_text, rows })
    }

    /// Read every upload of a request in order. Identical uploads are all
    /// read; a repeat is only noted in the log.
    pub fn process_batch<T: AsRef<[u8]>>(&self, uploads: &[T]) -> Result<Vec<ScoreSheet>, PipelineError> {
        let mut sheets: Vec<ScoreSheet> = Vec::with_capacity(uploads.len());
        for (index, data) in uploads.iter().enumerate() {
            let sheet = self.process_bytes(index, data.as_ref())?;
            if sheets.iter().any(|s| s.hash_hex == sheet.hash_hex) {
                tracing::warn!(index, hash = %sheet.hash_hex, "same screenshot uploaded more than once");
            }
            sheets.push(sheet);
        }
        Ok(sheets)
    }
}

/// Concatenate the rows of every sheet, in upload order, into readings.
pub fn readings(sheets: Vec<ScoreSheet>) -> Vec<RawReading> {
    RawReading::sequence(sheets.into_iter().map(|s| s.rows))
}

fn sha256_hex(data: &[u8]) -> String {
    let digest: [u8; 32] = Sha256::digest(data).into();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
