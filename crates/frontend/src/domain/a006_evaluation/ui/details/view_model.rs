use super::model;
use contracts::domain::a001_classe::Classe;
use contracts::domain::a005_matiere::Matiere;
use contracts::domain::a006_evaluation::{EvaluationChoices, EvaluationDto, DEFAULT_NOTE_SUR};
use contracts::domain::common::{EntityId, EntityRef, ReferenceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_api, ApiClient, Resource};
use crate::shared::dialogs;
use crate::shared::list_utils::format_decimal;
use crate::shared::references::{use_choices, use_reference};
use crate::system::context::use_app_context;

#[derive(Clone, Copy)]
pub struct EvaluationDetailsViewModel {
    pub form: RwSignal<EvaluationDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub types: ReadSignal<Vec<EntityRef>>,
    pub matieres: ReadSignal<Vec<EntityRef>>,
    pub classes: ReadSignal<Vec<EntityRef>>,
    pub periodes: Signal<Vec<EntityRef>>,
    api: ApiClient,
}

impl EvaluationDetailsViewModel {
    pub fn new() -> Self {
        let app_ctx = use_app_context();
        let current_periode = app_ctx.with_untracked(|c| c.periode.as_ref().map(|p| p.id));
        let form = EvaluationDto {
            periode_id: current_periode,
            note_sur: format_decimal(DEFAULT_NOTE_SUR),
            ..Default::default()
        };
        Self {
            form: RwSignal::new(form),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            types: use_reference(ReferenceKind::TypesEvaluation),
            matieres: use_choices::<Matiere>(Resource::Matieres, Matiere::to_ref),
            classes: use_choices::<Classe>(Resource::Classes, Classe::to_ref),
            periodes: Signal::derive(move || app_ctx.with(|c| c.periodes.clone())),
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
                Ok(evaluation) => form.set(EvaluationDto::from(&evaluation)),
                Err(e) => error.set(Some(format!("Erreur de chargement: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let types = self.types.get_untracked();
        let matieres = self.matieres.get_untracked();
        let classes = self.classes.get_untracked();
        let periodes = self.periodes.get_untracked();
        let choices = EvaluationChoices {
            types: &types,
            matieres: &matieres,
            classes: &classes,
            periodes: &periodes,
        };
        let payload = match self.form.with_untracked(|f| f.to_payload(&choices)) {
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
