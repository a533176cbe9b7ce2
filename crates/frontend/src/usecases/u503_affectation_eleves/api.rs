use contracts::domain::a001_classe::Classe;
use contracts::domain::a003_eleve::Eleve;
use contracts::domain::common::{EntityId, EntityRef};
use contracts::usecases::u503_affectation_eleves::AffectationElevesRequest;

use crate::shared::api::{ApiClient, ApiError, Resource};

pub async fn fetch_classes(api: &ApiClient) -> Result<Vec<EntityRef>, ApiError> {
    let list: Vec<Classe> = api.get_cached(&api.endpoints().collection(Resource::Classes)).await?;
    Ok(list.iter().map(Classe::to_ref).collect())
}

/// Students without a class, and students of `classe`.
pub async fn fetch_eleves(
    api: &ApiClient,
    classe: EntityId,
) -> Result<(Vec<EntityRef>, Vec<EntityRef>), ApiError> {
    let list: Vec<Eleve> = api.get(&api.endpoints().collection(Resource::Eleves)).await?;
    Ok(split_by_classe(&list, classe))
}

pub fn split_by_classe(eleves: &[Eleve], classe: EntityId) -> (Vec<EntityRef>, Vec<EntityRef>) {
    let mut sans_classe = Vec::new();
    let mut dans_classe = Vec::new();
    for eleve in eleves {
        match &eleve.classe {
            None => sans_classe.push(eleve.to_ref()),
            Some(c) if c.id == classe => dans_classe.push(eleve.to_ref()),
            Some(_) => {}
        }
    }
    (sans_classe, dans_classe)
}

pub async fn submit(api: &ApiClient, request: &AffectationElevesRequest) -> Result<(), ApiError> {
    api.post_unit(
        &api.endpoints().affectation_eleves(),
        request,
        &[Resource::Eleves, Resource::Classes],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eleve(id: EntityId, classe: Option<EntityId>) -> Eleve {
        Eleve {
            id,
            matricule: format!("M{}", id),
            nom: "Nom".into(),
            prenoms: "Prénom".into(),
            sexe: None,
            date_naissance: None,
            lieu_naissance: None,
            classe: classe.map(EntityRef::from_id),
        }
    }

    #[test]
    fn students_of_other_classes_are_left_out() {
        let list = vec![eleve(1, None), eleve(2, Some(10)), eleve(3, Some(11)), eleve(4, None)];
        let (source, target) = split_by_classe(&list, 10);
        assert_eq!(source.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(target.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }
}
