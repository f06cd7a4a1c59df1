//! Pearson correlation between campaign series.

use crate::effectiveness::round_to;
use crate::series::CampaignSeries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of `x` and `y`, rounded to four decimals.
///
/// Returns 0 when either series is constant (zero denominator), when the
/// inputs are empty, when their lengths differ, or when a non-finite input
/// leaves the coefficient undefined.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() || x.len() != y.len() {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = sum_sq_x.sqrt() * sum_sq_y.sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let r = numerator / denominator;
    if !r.is_finite() {
        return 0.0;
    }
    round_to(r, 4)
}

/// The four correlations shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationSet {
    /// Total spend vs. total engagement.
    pub spend_engagement: f64,
    /// Total spend vs. cumulative streams.
    pub spend_streams: f64,
    /// Total engagement vs. cumulative streams.
    pub engagement_streams: f64,
    /// Total spend vs. daily streams.
    pub spend_daily_streams: f64,
}

impl CorrelationSet {
    pub fn compute(series: &CampaignSeries) -> Self {
        Self {
            spend_engagement: correlation(series.total_spent(), series.total_engagement()),
            spend_streams: correlation(series.total_spent(), series.total_streams()),
            engagement_streams: correlation(series.total_engagement(), series.total_streams()),
            spend_daily_streams: correlation(series.total_spent(), series.daily_streams()),
        }
    }
}
