//! Change counters for cached data, read reactively by select lists.

use std::collections::HashMap;

use super::endpoints::Resource;

/// Bumped on every mutation of a resource and on every scope change
/// (period switch, logout).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revisions {
    scope: u64,
    resources: HashMap<Resource, u64>,
}

impl Revisions {
    pub fn scope(&self) -> u64 {
        self.scope
    }

    /// Differs from any earlier value once `resource` or the scope changed.
    pub fn of(&self, resource: Resource) -> (u64, u64) {
        (self.scope, self.resources.get(&resource).copied().unwrap_or(0))
    }

    pub fn bump(&mut self, resources: &[Resource]) {
        for resource in resources {
            *self.resources.entry(*resource).or_default() += 1;
        }
    }

    pub fn bump_scope(&mut self) {
        self.scope += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_moves_only_its_resources() {
        let mut revisions = Revisions::default();
        let personnel = revisions.of(Resource::Personnel);
        let matieres = revisions.of(Resource::Matieres);

        revisions.bump(&[Resource::Personnel]);
        assert_ne!(revisions.of(Resource::Personnel), personnel);
        assert_eq!(revisions.of(Resource::Matieres), matieres);
    }

    #[test]
    fn scope_change_moves_every_resource() {
        let mut revisions = Revisions::default();
        revisions.bump(&[Resource::Classes]);
        let classes = revisions.of(Resource::Classes);
        let matieres = revisions.of(Resource::Matieres);
        let scope = revisions.scope();

        revisions.bump_scope();
        assert_ne!(revisions.of(Resource::Classes), classes);
        assert_ne!(revisions.of(Resource::Matieres), matieres);
        assert_eq!(revisions.scope(), scope + 1);
    }
}
