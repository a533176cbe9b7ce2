use super::model;
use contracts::domain::a004_personnel::PersonnelDto;
use contracts::domain::common::{EntityId, EntityRef, ReferenceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, ApiClient};
use crate::shared::dialogs;
use crate::shared::references::use_reference;

#[derive(Clone, Copy)]
pub struct PersonnelDetailsViewModel {
    pub form: RwSignal<PersonnelDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub fonctions: ReadSignal<Vec<EntityRef>>,
    api: ApiClient,
}

impl PersonnelDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(PersonnelDto::default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            fonctions: use_reference(ReferenceKind::Fonctions),
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
                Ok(p) => form.set(PersonnelDto::from(&p)),
                Err(e) => error.set(Some(format!("Erreur de chargement: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let payload = self
            .form
            .with_untracked(|f| self.fonctions.with_untracked(|fonctions| f.to_payload(fonctions)));
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
