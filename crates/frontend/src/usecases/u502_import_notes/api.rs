use contracts::domain::a006_evaluation::Evaluation;
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

/// Evaluations grades can be imported into, for one period or the whole year.
pub async fn fetch_evaluations(
    api: &ApiClient,
    periode: Option<EntityId>,
) -> Result<Vec<Evaluation>, ApiError> {
    let endpoints = api.endpoints();
    let url = match periode {
        Some(id) => endpoints.collection_filtered(Resource::Evaluations, &[("periodeId", id.to_string())]),
        None => endpoints.collection(Resource::Evaluations),
    };
    let mut list: Vec<Evaluation> = api.get(&url).await?;
    list.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(list)
}
