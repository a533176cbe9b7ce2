use crate::domain::a001_classe::ui::details::ClasseDetails;
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
use contracts::domain::a001_classe::Classe;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub struct ClasseRow {
    pub id: EntityId,
    pub code: String,
    pub libelle: String,
    pub branche: String,
    pub salle: String,
    pub effectif_max: Option<u32>,
}

impl From<Classe> for ClasseRow {
    fn from(c: Classe) -> Self {
        Self {
            id: c.id,
            code: c.code,
            libelle: c.libelle,
            branche: c.branche.display(),
            salle: c.salle.map(|s| s.display()).unwrap_or_else(|| "-".to_string()),
            effectif_max: c.effectif_max,
        }
    }
}

impl Searchable for ClasseRow {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(&[&self.code, &self.libelle, &self.branche, &self.salle], filter)
    }
}

impl Sortable for ClasseRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => compare_text(&self.code, &other.code),
            "libelle" => compare_text(&self.libelle, &other.libelle),
            "branche" => compare_text(&self.branche, &other.branche),
            "salle" => compare_text(&self.salle, &other.salle),
            "effectif_max" => self.effectif_max.cmp(&other.effectif_max),
            _ => Ordering::Equal,
        }
    }
}

#[component]
pub fn ClasseList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let (items, set_items) = signal(Vec::<ClasseRow>::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    let sort = RwSignal::new(SortState::new("code"));
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        set_loading.set(true);
        spawn_local(async move {
            let url = api.endpoints().collection(Resource::Classes);
            match api.get::<Vec<Classe>>(&url).await {
                Ok(list) => {
                    set_items.set(list.into_iter().map(Into::into).collect());
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
            Some("max-width: min(640px, 95vw); width: min(640px, 95vw);".to_string()),
            Some("classe-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! { <ClasseDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
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

    // Failed deletions stay selected so they can be retried.
    let delete_selected = move |_| {
        let ids: Vec<EntityId> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        if !dialogs::confirm(&format!("Supprimer {} classe(s) ?", ids.len())) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Classes, ids).await;
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
                    <h1 class="header__title">"Classes"</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                        placeholder="Code, libellé, branche..."
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouvelle classe"
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
                            <th class="table__header-cell table__header-cell--checkbox">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    prop:checked=move || {
                                        let rows = visible.get();
                                        !rows.is_empty() && selected.with(|s| rows.iter().all(|r| s.contains(&r.id)))
                                    }
                                    on:change=move |ev| {
                                        if event_target_checked(&ev) {
                                            let ids: Vec<EntityId> = visible.with_untracked(|rows| rows.iter().map(|r| r.id).collect());
                                            set_selected.update(|s| s.extend(ids));
                                        } else {
                                            set_selected.set(HashSet::new());
                                        }
                                    }
                                />
                            </th>
                            <SortHeader label="Code" field="code" sort=sort />
                            <SortHeader label="Libellé" field="libelle" sort=sort />
                            <SortHeader label="Branche" field="branche" sort=sort />
                            <SortHeader label="Salle" field="salle" sort=sort />
                            <SortHeader label="Effectif max." field="effectif_max" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|row| {
                            let id = row.id;
                            view! {
                                <tr
                                    class=move || if selected.with(|s| s.contains(&id)) {
                                        "table__row table__row--selected"
                                    } else {
                                        "table__row"
                                    }
                                    on:click=move |_| open_details(Some(id))
                                >
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{row.code}</td>
                                    <td class="table__cell">{row.libelle}</td>
                                    <td class="table__cell">{row.branche}</td>
                                    <td class="table__cell">{row.salle}</td>
                                    <td class="table__cell table__cell--number">
                                        {row.effectif_max.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRef;

    fn row(code: &str, branche: &str, effectif: Option<u32>) -> ClasseRow {
        ClasseRow::from(Classe {
            id: 1,
            code: code.into(),
            libelle: format!("Classe {}", code),
            branche: EntityRef::new(1, None, branche),
            salle: None,
            effectif_max: effectif,
        })
    }

    #[test]
    fn rows_search_on_branch_and_sort_by_capacity() {
        let rows = vec![row("6E1", "Sixième", Some(50)), row("3E2", "Troisième", Some(40))];
        let found = filter_list(rows.clone(), "troi");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "3E2");

        let mut sorted = rows;
        sort_list(&mut sorted, "effectif_max", true);
        assert_eq!(sorted[0].code, "3E2");
        assert_eq!(sorted[1].salle, "-");
    }
}
