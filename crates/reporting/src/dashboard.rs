//! Dashboard snapshot: the immutable value the chart layer renders.
//!
//! Built by a pure pipeline (parse, build series, score) from one CSV
//! snapshot. Every load produces a fresh value; nothing is cached.

use crate::correlation::CorrelationSet;
use crate::effectiveness::{
    effectiveness_series, overall_engagement_effectiveness, overall_stream_effectiveness,
    EffectivenessPoint,
};
use crate::parser::parse_rows;
use crate::series::CampaignSeries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Headline cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Latest cumulative spend.
    pub total_spent: f64,
    /// Latest cumulative engagement.
    pub total_engagement: f64,
    /// Latest cumulative streams.
    pub total_streams: f64,
    /// Engagements per dollar spent.
    pub engagement_effectiveness: f64,
    /// Positive stream growth per dollar spent.
    pub stream_effectiveness: f64,
    /// Most recent date in the data, if any.
    pub last_updated: Option<String>,
}

/// One day of the series, as handed to charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    pub date: String,
    pub spend: f64,
    pub engagement: f64,
    pub streams: f64,
    pub daily_streams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpendEngagementPoint {
    pub date: String,
    pub spend: f64,
    pub engagement: f64,
}

/// `streams` is either cumulative or daily depending on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpendStreamsPoint {
    pub date: String,
    pub spend: f64,
    pub streams: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub summary: DashboardSummary,
    pub series: Vec<SeriesRecord>,
    pub effectiveness: Vec<EffectivenessPoint>,
    pub correlations: CorrelationSet,
}

impl DashboardSummary {
    pub fn from_series(series: &CampaignSeries) -> Self {
        Self {
            total_spent: last_or_zero(series.total_spent()),
            total_engagement: last_or_zero(series.total_engagement()),
            total_streams: last_or_zero(series.total_streams()),
            engagement_effectiveness: overall_engagement_effectiveness(series),
            stream_effectiveness: overall_stream_effectiveness(series),
            last_updated: series.last_date().map(str::to_string),
        }
    }
}

fn last_or_zero(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}

impl DashboardSnapshot {
    /// Run the full pipeline over raw CSV text.
    pub fn from_csv(text: &str) -> Self {
        let rows = parse_rows(text);
        Self::from_series(&CampaignSeries::from_rows(&rows))
    }

    pub fn from_series(series: &CampaignSeries) -> Self {
        Self {
            summary: DashboardSummary::from_series(series),
            series: series_records(series),
            effectiveness: effectiveness_series(series),
            correlations: CorrelationSet::compute(series),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Spend against total engagement.
    pub fn spend_vs_engagement(&self) -> Vec<SpendEngagementPoint> {
        self.series
            .iter()
            .map(|r| SpendEngagementPoint {
                date: r.date.clone(),
                spend: r.spend,
                engagement: r.engagement,
            })
            .collect()
    }

    /// Spend against cumulative streams.
    pub fn spend_vs_streams(&self) -> Vec<SpendStreamsPoint> {
        self.project_streams(|r| r.streams)
    }

    /// Spend against daily streams.
    pub fn spend_vs_daily_streams(&self) -> Vec<SpendStreamsPoint> {
        self.project_streams(|r| r.daily_streams)
    }

    fn project_streams(&self, streams: impl Fn(&SeriesRecord) -> f64) -> Vec<SpendStreamsPoint> {
        self.series
            .iter()
            .map(|r| SpendStreamsPoint {
                date: r.date.clone(),
                spend: r.spend,
                streams: streams(r),
            })
            .collect()
    }
}

fn series_records(series: &CampaignSeries) -> Vec<SeriesRecord> {
    series
        .dates()
        .iter()
        .enumerate()
        .map(|(i, date)| SeriesRecord {
            date: date.clone(),
            spend: series.total_spent()[i],
            engagement: series.total_engagement()[i],
            streams: series.total_streams()[i],
            daily_streams: series.daily_streams()[i],
        })
        .collect()
}
