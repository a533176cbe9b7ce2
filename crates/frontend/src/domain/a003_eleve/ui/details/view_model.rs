use super::model;
use contracts::domain::a003_eleve::EleveDto;
use contracts::domain::common::{EntityId, EntityRef};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, ApiClient};
use crate::shared::dialogs;

#[derive(Clone, Copy)]
pub struct EleveDetailsViewModel {
    pub form: RwSignal<EleveDto>,
    /// Class shown read-only; assignment goes through the affectation screen.
    pub classe: RwSignal<Option<EntityRef>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    api: ApiClient,
}

impl EleveDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(EleveDto::default()),
            classe: RwSignal::new(None),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            api: use_api(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    /// First validation message, if any; shown under the form.
    pub fn validation_message(&self) -> Option<String> {
        self.form.with(|f| f.validate().err())
    }

    pub fn load_if_needed(&self, id: Option<EntityId>) {
        let Some(id) = id else {
            return;
        };
        let (api, form, classe, error) = (self.api, self.form, self.classe, self.error);
        spawn_local(async move {
            match model::fetch_by_id(&api, id).await {
                Ok(eleve) => {
                    form.set(EleveDto::from(&eleve));
                    classe.set(eleve.classe);
                }
                Err(e) => error.set(Some(format!("Erreur de chargement: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let payload = match self.form.with_untracked(|f| f.to_payload()) {
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
