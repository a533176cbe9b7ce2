use contracts::domain::a001_classe::{Classe, ClassePayload};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Classe, ApiError> {
    api.get(&api.endpoints().item(Resource::Classes, id)).await
}

/// POST for a new classe, PUT for an existing one.
pub async fn save(api: &ApiClient, payload: &ClassePayload) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    match payload.id {
        Some(id) => {
            api.put_unit(&endpoints.item(Resource::Classes, id), payload, &[Resource::Classes])
                .await
        }
        None => {
            api.post_unit(&endpoints.collection(Resource::Classes), payload, &[Resource::Classes])
                .await
        }
    }
}
