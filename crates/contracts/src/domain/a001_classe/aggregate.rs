use serde::{Deserialize, Serialize};

use crate::domain::common::{validate_code_libelle, EntityId, EntityRef};

/// Section de classe (ex. "6e 1") rattachée à une branche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classe {
    pub id: EntityId,
    pub code: String,
    pub libelle: String,
    pub branche: EntityRef,
    #[serde(default)]
    pub salle: Option<EntityRef>,
    #[serde(default)]
    pub effectif_max: Option<u32>,
}

impl Classe {
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.id, Some(self.code.clone()), self.libelle.clone())
    }
}

/// Form state for create/edit. References are held as ids and rebuilt into
/// nested `EntityRef`s by [`ClasseDto::to_payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClasseDto {
    pub id: Option<EntityId>,
    pub code: String,
    pub libelle: String,
    pub branche_id: Option<EntityId>,
    pub salle_id: Option<EntityId>,
    pub effectif_max: Option<u32>,
}

impl From<&Classe> for ClasseDto {
    fn from(c: &Classe) -> Self {
        Self {
            id: Some(c.id),
            code: c.code.clone(),
            libelle: c.libelle.clone(),
            branche_id: Some(c.branche.id),
            salle_id: c.salle.as_ref().map(|s| s.id),
            effectif_max: c.effectif_max,
        }
    }
}

/// Body of `POST`/`PUT` on the classes endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub code: String,
    pub libelle: String,
    pub branche: EntityRef,
    pub salle: Option<EntityRef>,
    pub effectif_max: Option<u32>,
}

impl ClasseDto {
    pub fn validate(&self) -> Result<(), String> {
        validate_code_libelle(&self.code, &self.libelle)?;
        if self.branche_id.is_none() {
            return Err("La branche est obligatoire".into());
        }
        if let Some(0) = self.effectif_max {
            return Err("L'effectif maximum doit être supérieur à zéro".into());
        }
        Ok(())
    }

    pub fn to_payload(
        &self,
        branches: &[EntityRef],
        salles: &[EntityRef],
    ) -> Result<ClassePayload, String> {
        self.validate()?;
        let branche_id = self
            .branche_id
            .ok_or_else(|| "La branche est obligatoire".to_string())?;
        Ok(ClassePayload {
            id: self.id,
            code: self.code.trim().to_string(),
            libelle: self.libelle.trim().to_string(),
            branche: EntityRef::from_choices(branche_id, branches),
            salle: self.salle_id.map(|id| EntityRef::from_choices(id, salles)),
            effectif_max: self.effectif_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ClasseDto {
        ClasseDto {
            id: None,
            code: "6E1".into(),
            libelle: "Sixième 1".into(),
            branche_id: Some(1),
            salle_id: Some(7),
            effectif_max: Some(45),
        }
    }

    #[test]
    fn payload_embeds_nested_references() {
        let branches = vec![EntityRef::new(1, Some("6E".into()), "Sixième")];
        let payload = dto().to_payload(&branches, &[]).unwrap();
        assert_eq!(payload.branche.libelle, "Sixième");
        assert_eq!(payload.salle, Some(EntityRef::from_id(7)));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["branche"]["code"], "6E");
        assert_eq!(json["effectifMax"], 45);
    }

    #[test]
    fn branch_is_required() {
        let mut d = dto();
        d.branche_id = None;
        assert!(d.validate().is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut d = dto();
        d.effectif_max = Some(0);
        assert!(d.validate().is_err());
    }

    #[test]
    fn roundtrips_through_form() {
        let classe = Classe {
            id: 3,
            code: "5E2".into(),
            libelle: "Cinquième 2".into(),
            branche: EntityRef::from_id(2),
            salle: None,
            effectif_max: None,
        };
        let form = ClasseDto::from(&classe);
        assert_eq!(form.id, Some(3));
        assert_eq!(form.branche_id, Some(2));
        assert!(form.validate().is_ok());
    }
}
