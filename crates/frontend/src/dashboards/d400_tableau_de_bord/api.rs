use contracts::dashboards::d400_tableau_de_bord::DashboardStats;

use crate::shared::api::{ApiClient, ApiError};

/// Counters of the current school year.
pub async fn get_stats(api: &ApiClient) -> Result<DashboardStats, ApiError> {
    api.get(&api.endpoints().dashboard()).await
}
