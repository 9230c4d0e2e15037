use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Digits plus the letters the reader mistakes for digits; at least one real digit.
re!(re_score_token,
    r"^[0-9sSgHiIljzZ,.]*[0-9][0-9sSgHiIljzZ,.]*$");
re!(re_rank_prefix,
    r"^(?:#\d{1,3}|\d{1,3}[.)])\s+");
re!(re_header,
    r"(?i)^\s*(?:#|rank|pos(?:ition)?|player|name|member|score|points|trophies)(?:\s+(?:#|rank|pos(?:ition)?|player|name|member|score|points|trophies))*\s*$");

/// One leaderboard row as it appeared on a screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub player: String,
    /// Raw score text, thousands separators removed. Empty when the line
    /// carried nothing that looked like a score.
    pub text_points: String,
}

impl From<ScoreRow> for (String, String) {
    fn from(row: ScoreRow) -> Self {
        (row.player, row.text_points)
    }
}

/// Split recognized text into score rows, one per non-blank line, in the
/// order the lines appear.
pub fn extract_rows(ocr_text: &str) -> Vec<ScoreRow> {
    ocr_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| !re_header().is_match(l))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> ScoreRow {
    let line = re_rank_prefix().replace(line, "");
    let line = line.trim();

    match line.rsplit_once(char::is_whitespace) {
        Some((label, token)) if re_score_token().is_match(token) => ScoreRow {
            player: label.trim().to_string(),
            text_points: token.replace(',', ""),
        },
        None if re_score_token().is_match(line) => ScoreRow {
            player: String::new(),
            text_points: line.replace(',', ""),
        },
        _ => ScoreRow {
            player: line.to_string(),
            text_points: String::new(),
        },
    }
}
