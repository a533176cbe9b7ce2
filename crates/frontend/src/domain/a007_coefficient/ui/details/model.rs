use contracts::domain::a007_coefficient::{Coefficient, CoefficientPayload};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Coefficient, ApiError> {
    api.get(&api.endpoints().item(Resource::Coefficients, id)).await
}

pub async fn save(api: &ApiClient, payload: &CoefficientPayload) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    let invalidates = [Resource::Coefficients];
    match payload.id {
        Some(id) => api.put_unit(&endpoints.item(Resource::Coefficients, id), payload, &invalidates).await,
        None => api.post_unit(&endpoints.collection(Resource::Coefficients), payload, &invalidates).await,
    }
}
