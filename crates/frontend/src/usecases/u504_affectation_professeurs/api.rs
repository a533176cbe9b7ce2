use contracts::domain::a001_classe::Classe;
use contracts::domain::common::{EntityId, EntityRef};
use contracts::usecases::u504_affectation_professeurs::AffectationProfesseursRequest;

use crate::shared::api::{ApiClient, ApiError, Resource};

/// Every class of the year, and those already taught by `professeur` in `matiere`.
pub async fn fetch_classes(
    api: &ApiClient,
    professeur: EntityId,
    matiere: EntityId,
) -> Result<(Vec<EntityRef>, Vec<EntityRef>), ApiError> {
    let endpoints = api.endpoints();
    let all: Vec<Classe> = api.get_cached(&endpoints.collection(Resource::Classes)).await?;
    let assigned: Vec<EntityRef> = api
        .get(&endpoints.affectation_professeurs(Some((professeur, matiere))))
        .await?;
    Ok((all.iter().map(Classe::to_ref).collect(), assigned))
}

pub async fn submit(api: &ApiClient, request: &AffectationProfesseursRequest) -> Result<(), ApiError> {
    api.post_unit(&api.endpoints().affectation_professeurs(None), request, &[])
        .await
}
