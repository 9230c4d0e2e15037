pub mod award;
pub mod config;
pub mod correct;
pub mod detect;
pub mod entry;
pub mod normalize;
pub mod rank;

pub use award::{AwardTable, AwardTableError, DEFAULT_AWARDS};
pub use config::RankingConfig;
pub use correct::{Correction, ReinsertionCorrector};
pub use detect::{reference_mean, AnomalyDetector, Detection};
pub use entry::{Entry, RawReading};
pub use normalize::{normalize_points, substitute_confusables};
pub use rank::{rank, Ranker, Standings};
