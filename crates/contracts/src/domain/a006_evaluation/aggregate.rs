use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{EntityId, EntityRef};

/// Scale used when the form leaves "noté sur" empty.
pub const DEFAULT_NOTE_SUR: f64 = 20.0;

/// Évaluation (devoir, interrogation, composition) d'une matière dans une classe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: EntityId,
    pub code: String,
    pub type_evaluation: EntityRef,
    pub matiere: EntityRef,
    pub classe: EntityRef,
    pub periode: EntityRef,
    pub date: NaiveDate,
    #[serde(default = "default_note_sur")]
    pub note_sur: f64,
}

fn default_note_sur() -> f64 {
    DEFAULT_NOTE_SUR
}

impl Evaluation {
    pub fn title(&self) -> String {
        format!(
            "{} {} - {} ({})",
            self.type_evaluation.libelle,
            self.matiere.libelle,
            self.classe.libelle,
            self.date.format("%d/%m/%Y")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationDto {
    pub id: Option<EntityId>,
    pub code: String,
    pub type_evaluation_id: Option<EntityId>,
    pub matiere_id: Option<EntityId>,
    pub classe_id: Option<EntityId>,
    pub periode_id: Option<EntityId>,
    pub date: String,
    pub note_sur: String,
}

impl From<&Evaluation> for EvaluationDto {
    fn from(e: &Evaluation) -> Self {
        Self {
            id: Some(e.id),
            code: e.code.clone(),
            type_evaluation_id: Some(e.type_evaluation.id),
            matiere_id: Some(e.matiere.id),
            classe_id: Some(e.classe.id),
            periode_id: Some(e.periode.id),
            date: e.date.format("%Y-%m-%d").to_string(),
            note_sur: e.note_sur.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub code: String,
    pub type_evaluation: EntityRef,
    pub matiere: EntityRef,
    pub classe: EntityRef,
    pub periode: EntityRef,
    pub date: NaiveDate,
    pub note_sur: f64,
}

/// Reference lists the evaluation form picks from.
#[derive(Debug, Clone, Default)]
pub struct EvaluationChoices<'a> {
    pub types: &'a [EntityRef],
    pub matieres: &'a [EntityRef],
    pub classes: &'a [EntityRef],
    pub periodes: &'a [EntityRef],
}

impl EvaluationDto {
    fn parsed_date(&self) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "La date de l'évaluation est obligatoire".to_string())
    }

    fn parsed_note_sur(&self) -> Result<f64, String> {
        let text = self.note_sur.trim();
        if text.is_empty() {
            return Ok(DEFAULT_NOTE_SUR);
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => Err(format!("Barème invalide: {}", text)),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Le code est obligatoire".into());
        }
        if self.type_evaluation_id.is_none() {
            return Err("Le type d'évaluation est obligatoire".into());
        }
        if self.matiere_id.is_none() {
            return Err("La matière est obligatoire".into());
        }
        if self.classe_id.is_none() {
            return Err("La classe est obligatoire".into());
        }
        if self.periode_id.is_none() {
            return Err("La période est obligatoire".into());
        }
        self.parsed_date()?;
        self.parsed_note_sur()?;
        Ok(())
    }

    pub fn to_payload(&self, choices: &EvaluationChoices<'_>) -> Result<EvaluationPayload, String> {
        self.validate()?;
        let pick = |id: Option<EntityId>, list: &[EntityRef]| {
            EntityRef::from_choices(id.unwrap_or_default(), list)
        };
        Ok(EvaluationPayload {
            id: self.id,
            code: self.code.trim().to_string(),
            type_evaluation: pick(self.type_evaluation_id, choices.types),
            matiere: pick(self.matiere_id, choices.matieres),
            classe: pick(self.classe_id, choices.classes),
            periode: pick(self.periode_id, choices.periodes),
            date: self.parsed_date()?,
            note_sur: self.parsed_note_sur()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> EvaluationDto {
        EvaluationDto {
            id: None,
            code: "DEV1".into(),
            type_evaluation_id: Some(1),
            matiere_id: Some(2),
            classe_id: Some(3),
            periode_id: Some(4),
            date: "2024-11-15".into(),
            note_sur: "".into(),
        }
    }

    #[test]
    fn empty_scale_defaults_to_twenty() {
        let p = dto().to_payload(&EvaluationChoices::default()).unwrap();
        assert_eq!(p.note_sur, 20.0);
        assert_eq!(p.classe, EntityRef::from_id(3));
    }

    #[test]
    fn negative_scale_is_rejected() {
        let mut d = dto();
        d.note_sur = "-5".into();
        assert!(d.validate().unwrap_err().starts_with("Barème invalide"));
    }

    #[test]
    fn date_is_required() {
        let mut d = dto();
        d.date = String::new();
        assert!(d.validate().is_err());
    }
}
