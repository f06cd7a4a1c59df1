//! REST handlers feeding the dashboard's cards and charts.
//!
//! Every dashboard request reloads the CSV and rebuilds the snapshot from
//! scratch. A failed read still answers 200 with a zeroed dashboard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_core::config::CampaignInfo;
use campaign_reporting::{
    load_snapshot, CorrelationSet, DashboardSnapshot, DashboardSummary, EffectivenessPoint,
    SeriesRecord, SpendStreamsPoint,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub csv_path: Arc<str>,
    pub campaign: Arc<CampaignInfo>,
    pub start_time: Instant,
}

impl AppState {
    async fn snapshot(&self, endpoint: &'static str) -> DashboardSnapshot {
        metrics::counter!("api.dashboard.requests", "endpoint" => endpoint).increment(1);
        load_snapshot(&*self.csv_path).await
    }
}

/// Header shown above the dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignHeader {
    pub title: String,
    pub artist: String,
    pub cover_art: String,
}

impl From<&CampaignInfo> for CampaignHeader {
    fn from(info: &CampaignInfo) -> Self {
        Self {
            title: info.title.clone(),
            artist: info.artist.clone(),
            cover_art: info.cover_art.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub campaign: CampaignHeader,
    pub dashboard: DashboardSnapshot,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/v1/dashboard — Full dashboard payload.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Campaign header and dashboard snapshot", body = DashboardResponse))
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let dashboard = state.snapshot("dashboard").await;
    Json(DashboardResponse {
        campaign: CampaignHeader::from(state.campaign.as_ref()),
        dashboard,
        generated_at: Utc::now(),
    })
}

/// GET /api/v1/dashboard/summary — Headline totals and effectiveness.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    tag = "Dashboard",
    responses((status = 200, description = "Summary cards", body = DashboardSummary))
)]
pub async fn get_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.snapshot("summary").await.summary)
}

/// GET /api/v1/dashboard/series — Per-day series records.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/series",
    tag = "Dashboard",
    responses((status = 200, description = "Series records in date order", body = [SeriesRecord]))
)]
pub async fn get_series(State(state): State<AppState>) -> Json<Vec<SeriesRecord>> {
    Json(state.snapshot("series").await.series)
}

/// GET /api/v1/dashboard/effectiveness — Combined effectiveness over time.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/effectiveness",
    tag = "Dashboard",
    responses((status = 200, description = "Per-day combined effectiveness", body = [EffectivenessPoint]))
)]
pub async fn get_effectiveness(State(state): State<AppState>) -> Json<Vec<EffectivenessPoint>> {
    Json(state.snapshot("effectiveness").await.effectiveness)
}

/// GET /api/v1/dashboard/correlations — Correlation analysis.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/correlations",
    tag = "Dashboard",
    responses((status = 200, description = "Pairwise Pearson correlations", body = CorrelationSet))
)]
pub async fn get_correlations(State(state): State<AppState>) -> Json<CorrelationSet> {
    Json(state.snapshot("correlations").await.correlations)
}

/// GET /api/v1/dashboard/charts/{chart} — Data for one combo chart.
///
/// `chart` is one of `spend-engagement`, `spend-streams`,
/// `spend-daily-streams`.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/charts/{chart}",
    tag = "Dashboard",
    params(("chart" = String, Path, description = "spend-engagement | spend-streams | spend-daily-streams")),
    responses(
        (status = 200, description = "Chart points in date order; `spend-engagement` returns SpendEngagementPoint records with `engagement` in place of `streams`", body = [SpendStreamsPoint]),
        (status = 404, description = "Unknown chart", body = ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(chart): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let Some(kind) = ChartKind::from_slug(&chart) else {
        warn!(chart = %chart, "Unknown chart requested");
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "unknown_chart".to_string(),
                message: format!("no chart named '{chart}'"),
            }),
        ));
    };

    let snapshot = state.snapshot("chart").await;
    let response = match kind {
        ChartKind::SpendEngagement => Json(snapshot.spend_vs_engagement()).into_response(),
        ChartKind::SpendStreams => Json(snapshot.spend_vs_streams()).into_response(),
        ChartKind::SpendDailyStreams => Json(snapshot.spend_vs_daily_streams()).into_response(),
    };
    Ok(response)
}

/// Combo charts on the dashboard, addressed by URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SpendEngagement,
    SpendStreams,
    SpendDailyStreams,
}

impl ChartKind {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "spend-engagement" => Some(Self::SpendEngagement),
            "spend-streams" => Some(Self::SpendStreams),
            "spend-daily-streams" => Some(Self::SpendDailyStreams),
            _ => None,
        }
    }
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /live — Liveness check.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
