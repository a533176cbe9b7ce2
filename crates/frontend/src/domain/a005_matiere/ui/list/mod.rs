use crate::domain::a005_matiere::ui::details::MatiereDetails;
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
use contracts::domain::a005_matiere::Matiere;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

impl Searchable for Matiere {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            &[&self.code, &self.libelle, self.categorie.as_deref().unwrap_or_default()],
            filter,
        )
    }
}

impl Sortable for Matiere {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => compare_text(&self.code, &other.code),
            "libelle" => compare_text(&self.libelle, &other.libelle),
            "categorie" => compare_text(
                self.categorie.as_deref().unwrap_or_default(),
                other.categorie.as_deref().unwrap_or_default(),
            ),
            _ => Ordering::Equal,
        }
    }
}

#[component]
pub fn MatiereList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let (items, set_items) = signal(Vec::<Matiere>::new());
    let (error, set_error) = signal(None::<String>);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    let sort = RwSignal::new(SortState::new("libelle"));
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        spawn_local(async move {
            match api.get::<Vec<Matiere>>(&api.endpoints().collection(Resource::Matieres)).await {
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

    let open_details = move |id: Option<EntityId>| {
        modal_stack.push_with_frame(
            Some("max-width: min(520px, 95vw); width: min(520px, 95vw);".to_string()),
            Some("matiere-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! { <MatiereDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
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
        if ids.is_empty() || !dialogs::confirm(&format!("Supprimer {} matière(s) ?", ids.len())) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Matieres, ids).await;
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
                    <h1 class="header__title">"Matières"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouvelle matière"
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
                            <SortHeader label="Catégorie" field="categorie" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|m| {
                            let id = m.id;
                            view! {
                                <tr class="table__row" on:click=move |_| open_details(Some(id))>
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{m.code}</td>
                                    <td class="table__cell">{m.libelle}</td>
                                    <td class="table__cell">{m.categorie.unwrap_or_default()}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
