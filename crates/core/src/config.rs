use serde::{Deserialize, Serialize};

/// Tuning knobs for anomaly detection and correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Scores at or below this are too low to count toward the reference mean.
    pub plausibility_floor: f64,
    /// A score above `factor * reference_mean` is implausible.
    pub implausibility_factor: f64,
    /// Largest rank displacement still considered in order.
    pub displacement_tolerance: usize,
    /// Score written into the entry that gets corrected.
    pub sentinel_points: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            plausibility_floor: 4000.0,
            implausibility_factor: 2.0,
            displacement_tolerance: 1,
            sentinel_points: 333.0,
        }
    }
}
