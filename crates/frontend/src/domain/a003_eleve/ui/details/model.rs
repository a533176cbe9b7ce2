use contracts::domain::a003_eleve::{Eleve, ElevePayload};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Eleve, ApiError> {
    api.get(&api.endpoints().item(Resource::Eleves, id)).await
}

pub async fn save(api: &ApiClient, payload: &ElevePayload) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    match payload.id {
        Some(id) => {
            api.put_unit(&endpoints.item(Resource::Eleves, id), payload, &[Resource::Eleves])
                .await
        }
        None => {
            api.post_unit(&endpoints.collection(Resource::Eleves), payload, &[Resource::Eleves])
                .await
        }
    }
}
