use serde::Serialize;

use crate::award::AwardTable;
use crate::config::RankingConfig;
use crate::correct::{Correction, ReinsertionCorrector};
use crate::detect::AnomalyDetector;
use crate::entry::{Entry, RawReading};

/// The outcome of one ranking run.
#[derive(Debug, Clone, Serialize)]
pub struct Standings {
    /// Ordered by `position`, ascending.
    pub entries: Vec<Entry>,
    pub reference_mean: Option<f64>,
    /// Entries the detector flagged, corrected or not.
    pub flagged: usize,
    #[serde(skip)]
    pub correction: Option<Correction>,
}

impl Standings {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flagged entries that kept their reported score.
    pub fn uncorrected(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.flagged && !e.corrected)
    }
}

/// Turns a batch of raw readings into a final leaderboard.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankingConfig,
    awards: AwardTable,
}

impl Ranker {
    pub fn new(config: RankingConfig, awards: AwardTable) -> Self {
        Self { config, awards }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn awards(&self) -> &AwardTable {
        &self.awards
    }

    pub fn rank(&self, readings: &[RawReading]) -> Standings {
        let mut entries: Vec<Entry> = readings.iter().map(Entry::from_reading).collect();
        entries.sort_by_key(|e| e.ingestion_index);

        let detection = AnomalyDetector::new(&self.config).detect(&mut entries);

        let correction = if detection.flagged > 0 {
            ReinsertionCorrector::new(&self.awards, self.config.sentinel_points).correct(&mut entries)
        } else {
            for entry in entries.iter_mut() {
                entry.award = self.awards.award_for(entry.position);
            }
            None
        };

        if detection.flagged > 1 {
            tracing::warn!(
                flagged = detection.flagged,
                uncorrected = detection.flagged - 1,
                "more than one anomalous reading; only the first was corrected"
            );
        }

        Standings {
            entries,
            reference_mean: detection.reference_mean,
            flagged: detection.flagged,
            correction,
        }
    }
}

/// Rank `readings` with the default thresholds.
pub fn rank(readings: &[RawReading], awards: &AwardTable) -> Standings {
    Ranker::new(RankingConfig::default(), awards.clone()).rank(readings)
}
