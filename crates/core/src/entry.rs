use serde::{Deserialize, Serialize};

use crate::normalize::normalize_points;

/// One score row as read off a screenshot, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    /// Label text that preceded the score on the row. May be empty.
    pub player: String,
    /// Score text exactly as the reader produced it.
    pub text_points: String,
    /// 0-based position across all uploaded images, in upload order.
    pub ingestion_index: usize,
}

impl RawReading {
    pub fn new(player: impl Into<String>, text_points: impl Into<String>, ingestion_index: usize) -> Self {
        Self {
            player: player.into(),
            text_points: text_points.into(),
            ingestion_index,
        }
    }

    /// Concatenate the rows of several images in upload order, assigning a
    /// contiguous `ingestion_index` across all of them.
    pub fn sequence<B, R>(batches: B) -> Vec<RawReading>
    where
        B: IntoIterator,
        B::Item: IntoIterator<Item = R>,
        R: Into<(String, String)>,
    {
        batches
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(idx, row)| {
                let (player, text_points) = row.into();
                RawReading { player, text_points, ingestion_index: idx }
            })
            .collect()
    }
}

/// Working record for one player, evolved in place through a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub player: String,
    /// Finite, non-negative score. Holds the sentinel once corrected.
    pub points: f64,
    pub ingestion_index: usize,
    /// `ingestion_index + 1`: the rank the entry would hold if nothing were sorted.
    pub expected_position: usize,
    /// Final 1-based rank; 0 until the first ranking pass.
    pub position: usize,
    pub award: u32,
    pub flagged: bool,
    pub corrected: bool,
}

impl Entry {
    pub fn from_reading(reading: &RawReading) -> Self {
        Self {
            player: reading.player.clone(),
            points: normalize_points(&reading.text_points),
            ingestion_index: reading.ingestion_index,
            expected_position: reading.ingestion_index + 1,
            position: 0,
            award: 0,
            flagged: false,
            corrected: false,
        }
    }

    /// How far the current position sits from the ingestion-order position.
    pub fn displacement(&self) -> usize {
        self.position.abs_diff(self.expected_position)
    }
}
