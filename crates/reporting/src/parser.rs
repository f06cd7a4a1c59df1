//! CSV row parsing for the daily engagement export.
//!
//! Columns are positional: `Date, TotalStreams, TotalEngagement, TotalSpent`.
//! Lines that do not tokenize into exactly four fields are skipped, and
//! numeric fields that fail to parse read as zero.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A field is either a double-quoted span or a run of non-comma characters.
static FIELD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(.*?)"|([^,]+)"#).expect("field pattern is valid"));

/// Leading decimal number of a field; trailing text is ignored.
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("number pattern is valid")
});

/// Number of columns in a well-formed data line.
const FIELD_COUNT: usize = 4;

/// One day of campaign totals as reported in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRow {
    /// Calendar date, kept verbatim from the source.
    pub date: String,
    pub total_streams: f64,
    pub total_engagement: f64,
    pub total_spent: f64,
}

/// Parse raw CSV text into rows, in input order. The first line is treated
/// as the header and skipped.
pub fn parse_rows(text: &str) -> Vec<CampaignRow> {
    text.split('\n').skip(1).filter_map(parse_line).collect()
}

/// Tokenize a single data line. Returns `None` unless exactly four fields
/// are found.
pub fn parse_line(line: &str) -> Option<CampaignRow> {
    let fields: Vec<String> = FIELD_PATTERN
        .find_iter(line)
        .map(|m| clean_field(m.as_str()))
        .collect();

    if fields.len() != FIELD_COUNT {
        return None;
    }

    let mut fields = fields.into_iter();
    let date = fields.next()?;
    let total_streams = parse_number(&fields.next()?);
    let total_engagement = parse_number(&fields.next()?);
    let total_spent = parse_number(&fields.next()?);

    Some(CampaignRow {
        date,
        total_streams,
        total_engagement,
        total_spent,
    })
}

fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

/// Lenient float parse of the leading number in `field`, so `"25 USD"`
/// reads as 25. No number, or a value that is not finite, reads as zero.
fn parse_number(field: &str) -> f64 {
    NUMBER_PREFIX
        .find(field)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
