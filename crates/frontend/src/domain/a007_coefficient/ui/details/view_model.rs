use super::model;
use contracts::domain::a005_matiere::Matiere;
use contracts::domain::a007_coefficient::CoefficientDto;
use contracts::domain::common::{EntityId, EntityRef, ReferenceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, ApiClient, Resource};
use crate::shared::dialogs;
use crate::shared::references::{use_choices, use_reference};

#[derive(Clone, Copy)]
pub struct CoefficientDetailsViewModel {
    pub form: RwSignal<CoefficientDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub branches: ReadSignal<Vec<EntityRef>>,
    pub matieres: ReadSignal<Vec<EntityRef>>,
    api: ApiClient,
}

impl CoefficientDetailsViewModel {
    /// `branche_id` preselects the branch of a new coefficient.
    pub fn new(branche_id: Option<EntityId>) -> Self {
        Self {
            form: RwSignal::new(CoefficientDto {
                branche_id,
                ..Default::default()
            }),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            branches: use_reference(ReferenceKind::Branches),
            matieres: use_choices::<Matiere>(Resource::Matieres, Matiere::to_ref),
            api: use_api(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    pub fn load_if_needed(&self, id: Option<EntityId>) {
        let Some(id) = id else {
            return;
        };
        let (api, form, error) = (self.api, self.form, self.error);
        spawn_local(async move {
            match model::fetch_by_id(&api, id).await {
                Ok(c) => form.set(CoefficientDto::from(&c)),
                Err(e) => error.set(Some(format!("Erreur de chargement: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let payload = self.form.with_untracked(|f| {
            self.branches.with_untracked(|branches| {
                self.matieres
                    .with_untracked(|matieres| f.to_payload(branches, matieres))
            })
        });
        let payload = match payload {
            Ok(p) => p,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        self.error.set(None);
        self.saving.set(true);
        let (api, error, saving) = (self.api, self.error, self.saving);
        spawn_local(async move {
            let result = model::save(&api, &payload).await;
            saving.set(false);
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => {
                    dialogs::alert(&dialogs::save_failed_message(&e));
                    error.set(Some(e.to_string()));
                }
            }
        });
    }
}
