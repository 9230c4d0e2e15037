use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Awards handed out when no table is configured, rank 1 first.
pub const DEFAULT_AWARDS: [u32; 20] = [
    100, 90, 82, 75, 69, 64, 60, 56, 53, 50, 47, 44, 41, 38, 35, 32, 29, 26, 23, 20,
];

#[derive(Debug, Error)]
pub enum AwardTableError {
    #[error("award {award} at position {position} exceeds the award before it ({previous})")]
    Increasing { position: usize, previous: u32, award: u32 },
    #[error("failed to parse award table: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Rank → award lookup. Awards never increase as rank gets worse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AwardTableDef", into = "AwardTableDef")]
pub struct AwardTable {
    awards: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
struct AwardTableDef {
    table: Vec<u32>,
}

impl TryFrom<AwardTableDef> for AwardTable {
    type Error = AwardTableError;
    fn try_from(def: AwardTableDef) -> Result<Self, Self::Error> {
        AwardTable::new(def.table)
    }
}

impl From<AwardTable> for AwardTableDef {
    fn from(t: AwardTable) -> Self {
        AwardTableDef { table: t.awards }
    }
}

impl Default for AwardTable {
    fn default() -> Self {
        Self { awards: DEFAULT_AWARDS.to_vec() }
    }
}

impl AwardTable {
    /// Build a table from awards for ranks 1, 2, 3, …
    pub fn new(awards: Vec<u32>) -> Result<Self, AwardTableError> {
        if let Some(i) = awards.windows(2).position(|w| w[1] > w[0]) {
            return Err(AwardTableError::Increasing {
                position: i + 2,
                previous: awards[i],
                award: awards[i + 1],
            });
        }
        Ok(Self { awards })
    }

    /// Parse a `table = [..]` TOML document.
    pub fn from_toml(toml_content: &str) -> Result<Self, AwardTableError> {
        let def: AwardTableDef = toml::from_str(toml_content)?;
        Self::new(def.table)
    }

    /// Award for a 1-based position; 0 outside the table.
    pub fn award_for(&self, position: usize) -> u32 {
        position
            .checked_sub(1)
            .and_then(|i| self.awards.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Number of ranks that carry an award.
    pub fn len(&self) -> usize {
        self.awards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }
}
