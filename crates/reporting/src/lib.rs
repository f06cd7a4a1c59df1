//! Influencer campaign reporting: CSV ingestion, daily series, effectiveness
//! scoring, correlation analysis, and the dashboard records handed to the
//! chart layer.

pub mod correlation;
pub mod dashboard;
pub mod effectiveness;
pub mod loader;
pub mod parser;
pub mod series;

pub use correlation::{correlation, CorrelationSet};
pub use dashboard::{
    DashboardSnapshot, DashboardSummary, SeriesRecord, SpendEngagementPoint, SpendStreamsPoint,
};
pub use effectiveness::{
    combined_effectiveness, effectiveness_series, stream_effectiveness, EffectivenessPoint,
};
pub use loader::{load_snapshot, read_source};
pub use parser::{parse_rows, CampaignRow};
pub use series::CampaignSeries;
