//! Effectiveness scoring: how much engagement and stream growth each dollar
//! of spend buys.
//!
//! The combined score is a fixed heuristic blend,
//! `(0.7 * engagement_per_dollar + 0.3 * stream_effectiveness) / 100`, and
//! stream effectiveness only credits growth acceleration (day-over-day
//! increases in daily streams).

use crate::series::CampaignSeries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const ENGAGEMENT_WEIGHT: f64 = 0.7;
pub const STREAM_WEIGHT: f64 = 0.3;
pub const EFFECTIVENESS_SCALE: f64 = 100.0;

/// Minimum number of elapsed days before stream growth is scored.
const MIN_HISTORY_DAYS: usize = 2;

/// Combined effectiveness for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessPoint {
    pub date: String,
    pub combined_effectiveness: f64,
}

/// Round to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn positive_growth(daily_streams: &[f64], k: usize) -> f64 {
    (daily_streams[k] - daily_streams[k - 1]).max(0.0)
}

/// Spend at `index`, or 1 when missing or zero so it can always divide.
fn spend_divisor(series: &CampaignSeries, index: usize) -> f64 {
    match series.total_spent().get(index) {
        Some(&spent) if spent != 0.0 && !spent.is_nan() => spent,
        _ => 1.0,
    }
}

/// Positive stream growth per dollar up to `cutoff_index`, rounded to two
/// decimals.
///
/// With `total_days = cutoff_index - 1`, sums the positive part of
/// `daily_streams[k] - daily_streams[k - 1]` for `k` in `1..total_days` and
/// divides by `total_spent[total_days - 1]`. Returns 0 while fewer than two
/// days have elapsed. Indices past the end of the series contribute nothing.
pub fn stream_effectiveness(series: &CampaignSeries, cutoff_index: usize) -> f64 {
    let total_days = match cutoff_index.checked_sub(1) {
        Some(days) if days >= MIN_HISTORY_DAYS => days,
        _ => return 0.0,
    };

    let daily = series.daily_streams();
    let end = total_days.min(daily.len());
    let total_positive_growth = (1..end).fold(0.0, |sum, k| sum + positive_growth(daily, k));

    round_to(
        total_positive_growth / spend_divisor(series, total_days - 1),
        2,
    )
}

/// Engagement per dollar spent on day `index`, unrounded. `None` when the
/// day is missing or has no spend.
fn engagement_per_dollar(series: &CampaignSeries, index: usize) -> Option<f64> {
    let spent = *series.total_spent().get(index)?;
    if spent == 0.0 {
        return None;
    }
    let engagement = *series.total_engagement().get(index)?;
    Some(engagement / spent)
}

fn blend(engagement: f64, stream: f64) -> f64 {
    round_to(
        (ENGAGEMENT_WEIGHT * engagement + STREAM_WEIGHT * stream) / EFFECTIVENESS_SCALE,
        2,
    )
}

/// Combined effectiveness for day `index`. Days without spend, and indices
/// outside the series, score 0.
pub fn combined_effectiveness(series: &CampaignSeries, index: usize) -> f64 {
    match engagement_per_dollar(series, index) {
        Some(engagement) => blend(engagement, stream_effectiveness(series, index)),
        None => 0.0,
    }
}

/// Overall engagement per dollar from the latest cumulative totals, rounded
/// to two decimals. 0 for an empty series or zero spend.
pub fn overall_engagement_effectiveness(series: &CampaignSeries) -> f64 {
    series
        .len()
        .checked_sub(1)
        .and_then(|last| engagement_per_dollar(series, last))
        .map(|value| round_to(value, 2))
        .unwrap_or(0.0)
}

/// Overall stream effectiveness, evaluated at the last index of the series.
pub fn overall_stream_effectiveness(series: &CampaignSeries) -> f64 {
    stream_effectiveness(series, series.len().saturating_sub(1))
}

/// Per-day combined effectiveness for the whole series in one forward pass.
///
/// Keeps a running sum of positive growth instead of re-summing the prefix
/// for every day; results match [`combined_effectiveness`] at each index.
pub fn effectiveness_series(series: &CampaignSeries) -> Vec<EffectivenessPoint> {
    let daily = series.daily_streams();
    let mut running_growth = 0.0;

    series
        .dates()
        .iter()
        .enumerate()
        .map(|(index, date)| {
            // Day `index` sums growth terms k = 1..=index-2.
            let stream = if index > MIN_HISTORY_DAYS {
                running_growth += positive_growth(daily, index - 2);
                round_to(running_growth / spend_divisor(series, index - 2), 2)
            } else {
                0.0
            };

            let combined_effectiveness = engagement_per_dollar(series, index)
                .map(|engagement| blend(engagement, stream))
                .unwrap_or(0.0);

            EffectivenessPoint {
                date: date.clone(),
                combined_effectiveness,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CampaignRow;

    /// Builds a series whose daily streams are exactly `daily`.
    fn series_with(daily: &[f64], engagement: &[f64], spent: &[f64]) -> CampaignSeries {
        let mut cumulative = 0.0;
        let rows: Vec<_> = daily
            .iter()
            .enumerate()
            .map(|(i, d)| {
                cumulative += d;
                CampaignRow {
                    date: format!("2024-02-{:02}", i + 1),
                    total_streams: cumulative,
                    total_engagement: engagement[i],
                    total_spent: spent[i],
                }
            })
            .collect();
        CampaignSeries::from_rows(&rows)
    }

    fn growth_fixture() -> CampaignSeries {
        series_with(
            &[0.0, 200.0, 300.0, 250.0, 400.0, 500.0],
            &[10.0, 30.0, 60.0, 80.0, 100.0, 150.0],
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
        )
    }

    #[test]
    fn test_stream_effectiveness_needs_history() {
        let series = growth_fixture();
        for cutoff in 0..3 {
            assert_eq!(stream_effectiveness(&series, cutoff), 0.0);
        }
    }

    #[test]
    fn test_stream_effectiveness_counts_only_acceleration() {
        let series = growth_fixture();
        // k = 1: 200 over spend[1] = 20
        assert_eq!(stream_effectiveness(&series, 3), 10.0);
        // k = 1..3: 200 + 100 + 0 over spend[3] = 40
        assert_eq!(stream_effectiveness(&series, 5), 7.5);
        // k = 1..4: 200 + 100 + 0 + 150 over spend[4] = 50
        assert_eq!(stream_effectiveness(&series, 6), 9.0);
    }

    #[test]
    fn test_stream_effectiveness_rounds_to_cents() {
        let series = series_with(&[0.0, 100.0, 100.0], &[0.0; 3], &[3.0, 3.0, 3.0]);
        // 100 / 3
        assert_eq!(stream_effectiveness(&series, 3), 33.33);
    }

    #[test]
    fn test_stream_effectiveness_zero_spend_divides_by_one() {
        let series = series_with(&[0.0, 120.0, 50.0], &[0.0; 3], &[0.0, 0.0, 5.0]);
        assert_eq!(stream_effectiveness(&series, 3), 120.0);
    }

    #[test]
    fn test_stream_effectiveness_clamps_past_the_end() {
        let series = growth_fixture();
        // All growth terms (200 + 100 + 0 + 150 + 100), missing spend -> 1.
        assert_eq!(stream_effectiveness(&series, 100), 550.0);
        assert_eq!(stream_effectiveness(&CampaignSeries::default(), 10), 0.0);
    }

    #[test]
    fn test_combined_effectiveness_blend() {
        let series = growth_fixture();
        // Day 0: engagement 10 / 10 = 1.0, no stream history -> 0.7 / 100
        assert_eq!(combined_effectiveness(&series, 0), 0.01);
        // Day 5: 150 / 60 = 2.5; stream (cutoff 5) = 7.5
        // (0.7 * 2.5 + 0.3 * 7.5) / 100 = 0.04
        assert_eq!(combined_effectiveness(&series, 5), 0.04);
    }

    #[test]
    fn test_combined_effectiveness_zero_spend_and_out_of_range() {
        let series = series_with(&[0.0, 10.0], &[5.0, 9.0], &[0.0, 2.0]);
        assert_eq!(combined_effectiveness(&series, 0), 0.0);
        assert_eq!(combined_effectiveness(&series, 7), 0.0);
    }

    #[test]
    fn test_forward_pass_matches_per_index() {
        let series = series_with(
            &[0.0, 150.0, 90.0, 400.0, 410.0, 380.0, 900.0, 1200.0],
            &[5.0, 40.0, 90.0, 180.0, 260.0, 300.0, 520.0, 800.0],
            &[12.0, 0.0, 31.5, 44.0, 61.0, 77.0, 90.0, 125.0],
        );
        let points = effectiveness_series(&series);

        assert_eq!(points.len(), series.len());
        for (index, point) in points.iter().enumerate() {
            assert_eq!(point.date, series.dates()[index]);
            assert_eq!(
                point.combined_effectiveness,
                combined_effectiveness(&series, index),
                "day {index}"
            );
        }
    }

    #[test]
    fn test_overall_figures() {
        let series = growth_fixture();
        // 150 / 60
        assert_eq!(overall_engagement_effectiveness(&series), 2.5);
        // Evaluated at index len - 1 = 5.
        assert_eq!(overall_stream_effectiveness(&series), 7.5);
    }

    #[test]
    fn test_empty_series_degrades_to_zero() {
        let series = CampaignSeries::default();
        assert_eq!(overall_engagement_effectiveness(&series), 0.0);
        assert_eq!(overall_stream_effectiveness(&series), 0.0);
        assert!(effectiveness_series(&series).is_empty());
    }
}
