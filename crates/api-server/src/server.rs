//! API server — serves the dashboard JSON and the Prometheus exporter.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use axum::routing::get;
use axum::Router;
use campaign_core::config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// HTTP server for the dashboard's rendering layer.
pub struct ApiServer {
    config: AppConfig,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the router with all dashboard and operational routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            csv_path: Arc::from(self.config.data.csv_path.as_str()),
            campaign: Arc::new(self.config.campaign.clone()),
            start_time: Instant::now(),
        };

        Router::new()
            // Dashboard endpoints
            .route("/api/v1/dashboard", get(rest::get_dashboard))
            .route("/api/v1/dashboard/summary", get(rest::get_summary))
            .route("/api/v1/dashboard/series", get(rest::get_series))
            .route("/api/v1/dashboard/effectiveness", get(rest::get_effectiveness))
            .route("/api/v1/dashboard/correlations", get(rest::get_correlations))
            .route("/api/v1/dashboard/charts/:chart", get(rest::get_chart))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, csv_path = %self.config.data.csv_path, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::io::Write;
    use tower::ServiceExt;

    const CSV: &str = "Date,TotalStreams,TotalEngagement,TotalSpent\n\
\"2024-01-01\",1000,50,25.00\n\
\"2024-01-02\",1200,60,30.00\n\
\"2024-01-03\",1500,80,35.00\n";

    fn server_for(csv_path: &str) -> ApiServer {
        let mut config = AppConfig::default();
        config.data.csv_path = csv_path.to_string();
        ApiServer::new(config)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn export_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_dashboard_endpoint() {
        let file = export_file();
        let server = server_for(file.path().to_str().unwrap());

        let (status, body) = get_json(server.router(), "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["campaign"]["title"], "Jailbreak");
        assert_eq!(body["campaign"]["coverArt"], "/coverart.jpeg");
        assert_eq!(body["dashboard"]["summary"]["totalSpent"], 35.0);
        assert_eq!(body["dashboard"]["series"].as_array().unwrap().len(), 3);
        assert_eq!(body["dashboard"]["correlations"]["spendStreams"], 0.9934);
    }

    #[tokio::test]
    async fn test_section_endpoints() {
        let file = export_file();
        let server = server_for(file.path().to_str().unwrap());

        let (_, summary) = get_json(server.router(), "/api/v1/dashboard/summary").await;
        assert_eq!(summary["engagementEffectiveness"], 2.29);
        assert_eq!(summary["lastUpdated"], "2024-01-03");

        let (_, series) = get_json(server.router(), "/api/v1/dashboard/series").await;
        assert_eq!(series[2]["dailyStreams"], 300.0);

        let (_, effectiveness) = get_json(server.router(), "/api/v1/dashboard/effectiveness").await;
        assert_eq!(effectiveness[2]["combinedEffectiveness"], 0.02);

        let (_, correlations) = get_json(server.router(), "/api/v1/dashboard/correlations").await;
        assert_eq!(correlations["engagementStreams"], 0.9972);
    }

    #[tokio::test]
    async fn test_chart_endpoints() {
        let file = export_file();
        let server = server_for(file.path().to_str().unwrap());

        let (status, points) =
            get_json(server.router(), "/api/v1/dashboard/charts/spend-engagement").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(points[0]["engagement"], 50.0);

        let (_, points) = get_json(server.router(), "/api/v1/dashboard/charts/spend-streams").await;
        assert_eq!(points[1]["streams"], 1200.0);

        let (_, points) =
            get_json(server.router(), "/api/v1/dashboard/charts/spend-daily-streams").await;
        assert_eq!(points[1]["streams"], 200.0);
        assert_eq!(points[1]["spend"], 30.0);

        let (status, error) = get_json(server.router(), "/api/v1/dashboard/charts/pie").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["error"], "unknown_chart");
    }

    #[tokio::test]
    async fn test_missing_csv_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let server = server_for(missing.to_str().unwrap());

        let (status, body) = get_json(server.router(), "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dashboard"]["summary"]["totalStreams"], 0.0);
        assert!(body["dashboard"]["series"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let server = server_for("unused.csv");
        let (status, body) = get_json(server.router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_openapi_chart_response_has_schema() {
        let server = server_for("unused.csv");
        let (status, doc) = get_json(server.router(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let schema = &doc["paths"]["/api/v1/dashboard/charts/{chart}"]["get"]["responses"]["200"]
            ["content"]["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/SpendStreamsPoint");
        assert!(doc["components"]["schemas"]["SpendEngagementPoint"].is_object());
    }
}
