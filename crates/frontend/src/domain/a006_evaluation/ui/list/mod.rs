use crate::domain::a006_evaluation::ui::details::EvaluationDetails;
use crate::shared::api::{use_api, Resource};
use crate::shared::components::TableCheckbox;
use crate::shared::crud::delete_many;
use crate::shared::date_utils::format_date;
use crate::shared::dialogs;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, compare_text, filter_list, format_decimal, sort_list, SearchInput,
    Searchable, SortHeader, SortState, Sortable,
};
use crate::shared::modal_stack::ModalStackService;
use crate::system::context::use_app_context;
use contracts::domain::a006_evaluation::Evaluation;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

impl Searchable for Evaluation {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            &[
                &self.code,
                &self.type_evaluation.libelle,
                &self.matiere.libelle,
                &self.classe.libelle,
            ],
            filter,
        )
    }
}

impl Sortable for Evaluation {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => compare_text(&self.code, &other.code),
            "type" => compare_text(&self.type_evaluation.libelle, &other.type_evaluation.libelle),
            "matiere" => compare_text(&self.matiere.libelle, &other.matiere.libelle),
            "classe" => compare_text(&self.classe.libelle, &other.classe.libelle),
            "date" => self.date.cmp(&other.date),
            "note_sur" => self.note_sur.total_cmp(&other.note_sur),
            _ => Ordering::Equal,
        }
    }
}

#[component]
pub fn EvaluationList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let (items, set_items) = signal(Vec::<Evaluation>::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    // None lists every period of the year.
    let periode_filter = RwSignal::new(app_ctx.with_untracked(|c| c.periode.as_ref().map(|p| p.id)));
    let sort = RwSignal::new(SortState::new("date"));
    let refresh = RwSignal::new(0u32);

    // Switching the period in the header moves the filter along.
    Effect::new(move |prev: Option<Option<EntityId>>| {
        let current = app_ctx.with(|c| c.periode.as_ref().map(|p| p.id));
        if prev.is_some() && prev != Some(current) {
            periode_filter.set(current);
        }
        current
    });

    Effect::new(move |_| {
        refresh.track();
        let periode = periode_filter.get();
        set_loading.set(true);
        spawn_local(async move {
            let endpoints = api.endpoints();
            let url = match periode {
                Some(id) => endpoints
                    .collection_filtered(Resource::Evaluations, &[("periodeId", id.to_string())]),
                None => endpoints.collection(Resource::Evaluations),
            };
            match api.get::<Vec<Evaluation>>(&url).await {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });
    let reload = move || refresh.update(|n| *n += 1);

    let visible = Memo::new(move |_| {
        let mut rows = filter_list(items.get(), &search.get());
        sort.with(|s| sort_list(&mut rows, s.field, s.ascending));
        rows
    });

    let open_details = move |id: Option<EntityId>| {
        modal_stack.push_with_frame(
            Some("max-width: min(760px, 95vw); width: min(760px, 95vw);".to_string()),
            Some("evaluation-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! { <EvaluationDetails id=id on_saved=on_saved on_cancel=on_cancel /> }
                    .into_any()
            },
        );
    };

    let toggle_select = move |id: EntityId, checked: bool| {
        set_selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    };

    let delete_selected = move |_| {
        let ids: Vec<EntityId> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        let message = format!(
            "Supprimer {} évaluation(s) ? Les notes saisies seront perdues.",
            ids.len()
        );
        if !dialogs::confirm(&message) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Evaluations, ids).await;
            if !outcome.all_succeeded() {
                dialogs::alert(&outcome.summary());
            }
            set_selected.set(outcome.failed_ids().into_iter().collect());
            reload();
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Évaluations"</h1>
                </div>
                <div class="header__actions">
                    <select
                        class="header__filter"
                        on:change=move |ev| periode_filter.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="" selected=move || periode_filter.get().is_none()>
                            "Toutes les périodes"
                        </option>
                        {move || {
                            let current = periode_filter.get();
                            app_ctx.with(|c| c.periodes.clone()).into_iter().map(|p| view! {
                                <option value=p.id.to_string() selected=current == Some(p.id)>
                                    {p.libelle}
                                </option>
                            }).collect_view()
                        }}
                    </select>
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                        placeholder="Code, matière, classe..."
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouvelle évaluation"
                    </button>
                    <button class="button button--secondary" on:click=move |_| reload() disabled=move || loading.get()>
                        {icon("refresh")}
                        "Actualiser"
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=delete_selected
                        disabled=move || selected.with(|s| s.is_empty())
                    >
                        {icon("trash")}
                        {move || format!("Supprimer ({})", selected.with(|s| s.len()))}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--checkbox"></th>
                            <SortHeader label="Code" field="code" sort=sort />
                            <SortHeader label="Type" field="type" sort=sort />
                            <SortHeader label="Matière" field="matiere" sort=sort />
                            <SortHeader label="Classe" field="classe" sort=sort />
                            <th class="table__header-cell">"Période"</th>
                            <SortHeader label="Date" field="date" sort=sort />
                            <SortHeader label="Sur" field="note_sur" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|e| {
                            let id = e.id;
                            view! {
                                <tr class="table__row" on:click=move |_| open_details(Some(id))>
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{e.code}</td>
                                    <td class="table__cell">{e.type_evaluation.libelle}</td>
                                    <td class="table__cell">{e.matiere.libelle}</td>
                                    <td class="table__cell">{e.classe.libelle}</td>
                                    <td class="table__cell">{e.periode.libelle}</td>
                                    <td class="table__cell">{format_date(e.date)}</td>
                                    <td class="table__cell table__cell--number">{format_decimal(e.note_sur)}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
