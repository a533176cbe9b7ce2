use super::model;
use contracts::domain::a005_matiere::MatiereDto;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, ApiClient};
use crate::shared::dialogs;

#[derive(Clone, Copy)]
pub struct MatiereDetailsViewModel {
    pub form: RwSignal<MatiereDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    api: ApiClient,
}

impl MatiereDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(MatiereDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
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
                Ok(m) => form.set(MatiereDto::from(&m)),
                Err(e) => error.set(Some(format!("Erreur de chargement: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let dto = self.form.with_untracked(|f| f.normalized());
        if let Err(e) = dto.validate() {
            self.error.set(Some(e));
            return;
        }

        self.error.set(None);
        self.saving.set(true);
        let (api, error, saving) = (self.api, self.error, self.saving);
        spawn_local(async move {
            let result = model::save(&api, &dto).await;
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
