//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Influencer Campaign Dashboard API",
        version = "0.1.0",
        description = "Daily spend, engagement, and stream analytics for an influencer campaign.\n\nServes summary cards, chart series, effectiveness scores, and correlation analysis.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Dashboard", description = "Dashboard cards, chart series, effectiveness, and correlations"),
        (name = "Operations", description = "Health and liveness checks"),
    ),
    paths(
        // Dashboard
        crate::rest::get_dashboard,
        crate::rest::get_summary,
        crate::rest::get_series,
        crate::rest::get_effectiveness,
        crate::rest::get_correlations,
        crate::rest::get_chart,
        // Operations
        crate::rest::health_check,
        crate::rest::liveness,
    ),
    components(schemas(
        // Dashboard types
        campaign_reporting::DashboardSnapshot,
        campaign_reporting::DashboardSummary,
        campaign_reporting::SeriesRecord,
        campaign_reporting::EffectivenessPoint,
        campaign_reporting::CorrelationSet,
        campaign_reporting::SpendEngagementPoint,
        campaign_reporting::SpendStreamsPoint,
        crate::rest::CampaignHeader,
        crate::rest::DashboardResponse,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
