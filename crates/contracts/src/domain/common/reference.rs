use serde::{Deserialize, Serialize};

/// Read-only reference lists served by the API and cached client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Branches,
    Periodes,
    TypesEvaluation,
    Fonctions,
}

impl ReferenceKind {
    /// Path segment under the references root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Branches => "branches",
            Self::Periodes => "periodes",
            Self::TypesEvaluation => "types-evaluation",
            Self::Fonctions => "fonctions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Branches => "Branches",
            Self::Periodes => "Périodes",
            Self::TypesEvaluation => "Types d'évaluation",
            Self::Fonctions => "Fonctions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sexe {
    #[default]
    #[serde(rename = "M")]
    Masculin,
    #[serde(rename = "F")]
    Feminin,
}

impl Sexe {
    pub const CODES: &'static [&'static str] = &["M", "F"];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Masculin => "M",
            Self::Feminin => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Masculin => "Masculin",
            Self::Feminin => "Féminin",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Self::Masculin),
            "F" => Some(Self::Feminin),
            _ => None,
        }
    }
}
