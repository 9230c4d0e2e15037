use std::cmp::Ordering;

use crate::config::RankingConfig;
use crate::entry::Entry;

/// What a detection pass learned about the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Mean of the scores above the plausibility floor, if any exist.
    pub reference_mean: Option<f64>,
    pub flagged: usize,
}

/// Mean of all scores strictly above `floor`, or `None` when there are none.
pub fn reference_mean(entries: &[Entry], floor: f64) -> Option<f64> {
    let (sum, count) = entries
        .iter()
        .filter(|e| e.points > floor)
        .fold((0.0f64, 0usize), |(s, n), e| (s + e.points, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Highest score first; equal scores keep ingestion order.
fn by_points_desc(a: &Entry, b: &Entry) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| a.ingestion_index.cmp(&b.ingestion_index))
}

pub struct AnomalyDetector<'a> {
    config: &'a RankingConfig,
}

impl<'a> AnomalyDetector<'a> {
    pub fn new(config: &'a RankingConfig) -> Self {
        Self { config }
    }

    /// Sort `entries` by score, give each its candidate position, and flag
    /// the ones that are both implausibly high and out of ingestion order.
    pub fn detect(&self, entries: &mut [Entry]) -> Detection {
        let mean = reference_mean(entries, self.config.plausibility_floor);

        entries.sort_by(by_points_desc);
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.position = rank + 1;
        }

        let Some(mean) = mean else {
            tracing::debug!(entries = entries.len(), "no score above the plausibility floor; detection skipped");
            return Detection { reference_mean: None, flagged: 0 };
        };

        let ceiling = self.config.implausibility_factor * mean;
        let mut flagged = 0;
        for entry in entries.iter_mut() {
            let implausible = entry.points > ceiling;
            let out_of_order = entry.displacement() > self.config.displacement_tolerance;
            entry.flagged = implausible && out_of_order;
            if entry.flagged {
                flagged += 1;
                tracing::debug!(
                    ingestion_index = entry.ingestion_index,
                    points = entry.points,
                    candidate = entry.position,
                    expected = entry.expected_position,
                    "reading flagged as anomalous"
                );
            }
        }

        tracing::debug!(reference_mean = mean, ceiling, flagged, "detection complete");
        Detection { reference_mean: Some(mean), flagged }
    }
}
