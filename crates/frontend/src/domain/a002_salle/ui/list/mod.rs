use crate::domain::a002_salle::ui::details::SalleDetails;
use crate::shared::api::{use_api, Resource};
use crate::shared::components::TableCheckbox;
use crate::shared::crud::delete_many;
use crate::shared::dialogs;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, compare_text, filter_list, sort_list, SearchInput, Searchable, SortHeader,
    SortState, Sortable,
};
use crate::shared::modal_stack::ModalStackService;
use crate::system::context::use_app_context;
use contracts::domain::a002_salle::Salle;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

impl Searchable for Salle {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(&[&self.code, &self.libelle], filter)
    }
}

impl Sortable for Salle {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => compare_text(&self.code, &other.code),
            "libelle" => compare_text(&self.libelle, &other.libelle),
            "capacite" => self.capacite.cmp(&other.capacite),
            _ => Ordering::Equal,
        }
    }
}

#[component]
pub fn SalleList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let (items, set_items) = signal(Vec::<Salle>::new());
    let (error, set_error) = signal(None::<String>);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    let sort = RwSignal::new(SortState::new("code"));
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        spawn_local(async move {
            match api.get::<Vec<Salle>>(&api.endpoints().collection(Resource::Salles)).await {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });
    let reload = move || refresh.update(|n| *n += 1);

    let visible = Memo::new(move |_| {
        let mut rows = filter_list(items.get(), &search.get());
        sort.with(|s| sort_list(&mut rows, s.field, s.ascending));
        rows
    });
    let total_capacity = move || {
        visible.with(|rows| rows.iter().filter_map(|s| s.capacite).sum::<u32>())
    };

    let open_details = move |id: Option<EntityId>| {
        modal_stack.push_with_frame(
            Some("max-width: min(520px, 95vw); width: min(520px, 95vw);".to_string()),
            Some("salle-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! { <SalleDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
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
        if ids.is_empty() || !dialogs::confirm(&format!("Supprimer {} salle(s) ?", ids.len())) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Salles, ids).await;
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
                    <h1 class="header__title">"Salles"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouvelle salle"
                    </button>
                    <button class="button button--secondary" on:click=move |_| reload()>
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
                            <SortHeader label="Libellé" field="libelle" sort=sort />
                            <SortHeader label="Capacité" field="capacite" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|salle| {
                            let id = salle.id;
                            view! {
                                <tr class="table__row" on:click=move |_| open_details(Some(id))>
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{salle.code}</td>
                                    <td class="table__cell">{salle.libelle}</td>
                                    <td class="table__cell table__cell--number">
                                        {salle.capacite.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                    <tfoot>
                        <tr class="table__totals-row">
                            <td class="table__cell"></td>
                            <td class="table__cell" colspan="2">
                                {move || format!("{} salle(s)", visible.with(|v| v.len()))}
                            </td>
                            <td class="table__cell table__cell--number">{total_capacity}</td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        </div>
    }
}
