mod entity_ref;
mod reference;

pub use entity_ref::EntityRef;
pub use reference::{ReferenceKind, Sexe};

/// Ids assigned by the server. `None` means "not saved yet".
pub type EntityId = i64;

/// Optional trimmed text: empty input becomes `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Shared check for the `libelle`/`code` pair every catalogue entity carries.
pub fn validate_code_libelle(code: &str, libelle: &str) -> Result<(), String> {
    if code.trim().is_empty() {
        return Err("Le code est obligatoire".into());
    }
    if code.trim().chars().count() > 20 {
        return Err("Le code ne doit pas dépasser 20 caractères".into());
    }
    if libelle.trim().is_empty() {
        return Err("Le libellé est obligatoire".into());
    }
    Ok(())
}
