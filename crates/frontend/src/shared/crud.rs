//! Helpers shared by the CRUD list screens.

use contracts::domain::common::EntityId;

use crate::shared::api::{ApiClient, ApiError, Resource};

/// Aggregate result of a bulk action made of one request per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: Vec<(EntityId, String)>,
}

impl BulkOutcome {
    pub fn record(&mut self, id: EntityId, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(e) => self.failed.push((id, e.to_string())),
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ids to keep selected so the user can retry them.
    pub fn failed_ids(&self) -> Vec<EntityId> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            return format!("{} élément(s) supprimé(s)", self.succeeded);
        }
        let mut text = format!(
            "{} supprimé(s), {} en échec:",
            self.succeeded,
            self.failed.len()
        );
        for (id, message) in self.failed.iter().take(5) {
            text.push_str(&format!("\n- #{}: {}", id, message));
        }
        if self.failed.len() > 5 {
            text.push_str(&format!("\n... et {} autre(s)", self.failed.len() - 5));
        }
        text
    }
}

/// Deletes rows one by one; a failure does not stop the others.
pub async fn delete_many(api: &ApiClient, resource: Resource, ids: Vec<EntityId>) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for id in ids {
        let url = api.endpoints().item(resource, id);
        let result = api.delete(&url, &[resource]).await;
        if let Err(e) = &result {
            log::warn!("delete {:?} #{}: {}", resource, id, e);
        }
        outcome.record(id, result);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_successes_and_failures() {
        let mut outcome = BulkOutcome::default();
        outcome.record(1, Ok(()));
        outcome.record(
            2,
            Err(ApiError::Http {
                status: 409,
                message: "Classe non vide".into(),
            }),
        );
        outcome.record(3, Ok(()));
        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed_ids(), vec![2]);
        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.summary(), "2 supprimé(s), 1 en échec:\n- #2: Classe non vide");
    }

    #[test]
    fn summary_when_everything_went_fine() {
        let mut outcome = BulkOutcome::default();
        outcome.record(1, Ok(()));
        assert_eq!(outcome.summary(), "1 élément(s) supprimé(s)");
    }
}
