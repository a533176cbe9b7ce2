use contracts::domain::a004_personnel::{Personnel, PersonnelPayload};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Personnel, ApiError> {
    api.get(&api.endpoints().item(Resource::Personnel, id)).await
}

pub async fn save(api: &ApiClient, payload: &PersonnelPayload) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    let invalidates = [Resource::Personnel];
    match payload.id {
        Some(id) => api.put_unit(&endpoints.item(Resource::Personnel, id), payload, &invalidates).await,
        None => api.post_unit(&endpoints.collection(Resource::Personnel), payload, &invalidates).await,
    }
}
