//! One-shot fetch of the engagement CSV.

use crate::dashboard::DashboardSnapshot;
use campaign_core::{CampaignError, CampaignResult};
use std::path::Path;
use tracing::{debug, error, info};

/// Read the raw CSV text from `path`.
pub async fn read_source(path: impl AsRef<Path>) -> CampaignResult<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CampaignError::DataSource {
            path: path.display().to_string(),
            source,
        })
}

/// Fetch the CSV and build a fresh snapshot. A failed read is logged and
/// yields the zeroed default snapshot so the dashboard still renders.
pub async fn load_snapshot(path: impl AsRef<Path>) -> DashboardSnapshot {
    let path = path.as_ref();
    metrics::counter!("dashboard.loads").increment(1);

    match read_source(path).await {
        Ok(text) => {
            debug!(path = %path.display(), bytes = text.len(), "Loaded campaign CSV");
            let snapshot = DashboardSnapshot::from_csv(&text);
            info!(
                path = %path.display(),
                days = snapshot.series.len(),
                last_updated = snapshot.summary.last_updated.as_deref().unwrap_or("-"),
                "Dashboard snapshot built"
            );
            snapshot
        }
        Err(e) => {
            error!(error = %e, "Error loading CSV");
            metrics::counter!("dashboard.load_failures").increment(1);
            DashboardSnapshot::default()
        }
    }
}
