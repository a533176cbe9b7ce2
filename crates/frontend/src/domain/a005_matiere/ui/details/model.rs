use contracts::domain::a005_matiere::{Matiere, MatiereDto};
use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_by_id(api: &ApiClient, id: EntityId) -> Result<Matiere, ApiError> {
    api.get(&api.endpoints().item(Resource::Matieres, id)).await
}

/// Coefficients and evaluations embed the matière label, so their caches go too.
const INVALIDATES: &[Resource] = &[Resource::Matieres, Resource::Coefficients, Resource::Evaluations];

pub async fn save(api: &ApiClient, dto: &MatiereDto) -> Result<(), ApiError> {
    let endpoints = api.endpoints();
    match dto.id {
        Some(id) => api.put_unit(&endpoints.item(Resource::Matieres, id), dto, INVALIDATES).await,
        None => api.post_unit(&endpoints.collection(Resource::Matieres), dto, INVALIDATES).await,
    }
}
