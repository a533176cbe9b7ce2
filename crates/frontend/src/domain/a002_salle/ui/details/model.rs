use contracts::domain::a002_salle::{Salle, SalleDto};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Salle, ApiError> {
    api.get(&api.endpoints().item(Resource::Salles, id)).await
}

pub async fn save(api: &ApiClient, dto: &SalleDto) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    match dto.id {
        Some(id) => api.put_unit(&endpoints.item(Resource::Salles, id), dto, &[Resource::Salles]).await,
        None => api.post_unit(&endpoints.collection(Resource::Salles), dto, &[Resource::Salles]).await,
    }
}
