//! Index-aligned daily series built from parsed rows.

use crate::parser::CampaignRow;

/// Parallel per-day series. Index `i` refers to the same calendar day in
/// every vector; all five always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignSeries {
    dates: Vec<String>,
    total_spent: Vec<f64>,
    total_engagement: Vec<f64>,
    total_streams: Vec<f64>,
    daily_streams: Vec<f64>,
}

impl CampaignSeries {
    /// Build the series from rows in chronological order. Rows are not
    /// sorted here.
    pub fn from_rows(rows: &[CampaignRow]) -> Self {
        let dates = rows.iter().map(|r| r.date.clone()).collect();
        let total_spent = rows.iter().map(|r| r.total_spent).collect();
        let total_engagement = rows.iter().map(|r| r.total_engagement).collect();
        let total_streams: Vec<f64> = rows.iter().map(|r| r.total_streams).collect();
        let daily_streams = daily_deltas(&total_streams);

        Self {
            dates,
            total_spent,
            total_engagement,
            total_streams,
            daily_streams,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn total_spent(&self) -> &[f64] {
        &self.total_spent
    }

    pub fn total_engagement(&self) -> &[f64] {
        &self.total_engagement
    }

    /// Cumulative streams as reported.
    pub fn total_streams(&self) -> &[f64] {
        &self.total_streams
    }

    /// Day-over-day change in cumulative streams; the first day is 0.
    pub fn daily_streams(&self) -> &[f64] {
        &self.daily_streams
    }

    /// Date of the most recent day, if any.
    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }
}

/// First-difference of a cumulative series. Negative values (reporting
/// corrections) are kept as-is.
fn daily_deltas(cumulative: &[f64]) -> Vec<f64> {
    let mut deltas = Vec::with_capacity(cumulative.len());
    if cumulative.is_empty() {
        return deltas;
    }
    deltas.push(0.0);
    deltas.extend(cumulative.windows(2).map(|w| w[1] - w[0]));
    deltas
}
