use contracts::domain::a006_evaluation::{Evaluation, EvaluationPayload};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Evaluation, ApiError> {
    api.get(&api.endpoints().item(Resource::Evaluations, id)).await
}

pub async fn save(api: &ApiClient, payload: &EvaluationPayload) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    match payload.id {
        Some(id) => {
            api.put_unit(&endpoints.item(Resource::Evaluations, id), payload, &[Resource::Evaluations])
                .await
        }
        None => {
            api.post_unit(&endpoints.collection(Resource::Evaluations), payload, &[Resource::Evaluations])
                .await
        }
    }
}
