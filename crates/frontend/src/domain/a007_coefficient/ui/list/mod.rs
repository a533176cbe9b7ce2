use crate::domain::a007_coefficient::ui::details::CoefficientDetails;
use crate::shared::api::{use_api, Resource};
use crate::shared::components::TableCheckbox;
use crate::shared::crud::delete_many;
use crate::shared::dialogs;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, compare_text, filter_list, format_decimal, sort_list, SearchInput,
    Searchable, SortHeader, SortState, Sortable,
};
use crate::shared::modal_stack::ModalStackService;
use crate::shared::references::use_reference;
use crate::system::context::use_app_context;
use contracts::domain::a007_coefficient::Coefficient;
use contracts::domain::common::{EntityId, ReferenceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

impl Searchable for Coefficient {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(&[&self.branche.libelle, &self.matiere.libelle], filter)
    }
}

impl Sortable for Coefficient {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "branche" => compare_text(&self.branche.libelle, &other.branche.libelle)
                .then_with(|| compare_text(&self.matiere.libelle, &other.matiere.libelle)),
            "matiere" => compare_text(&self.matiere.libelle, &other.matiere.libelle),
            "valeur" => self.valeur.total_cmp(&other.valeur),
            _ => Ordering::Equal,
        }
    }
}

/// Sum of coefficients per branch, in first-seen order.
pub fn totals_by_branche(rows: &[Coefficient]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(b, _)| *b == row.branche.libelle) {
            Some((_, total)) => *total += row.valeur,
            None => totals.push((row.branche.libelle.clone(), row.valeur)),
        }
    }
    totals
}

#[component]
pub fn CoefficientList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let branches = use_reference(ReferenceKind::Branches);

    let (items, set_items) = signal(Vec::<Coefficient>::new());
    let (error, set_error) = signal(None::<String>);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    let (branche_filter, set_branche_filter) = signal(None::<EntityId>);
    let sort = RwSignal::new(SortState::new("branche"));
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        spawn_local(async move {
            let url = api.endpoints().collection(Resource::Coefficients);
            match api.get::<Vec<Coefficient>>(&url).await {
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
        let branche = branche_filter.get();
        let rows: Vec<Coefficient> = items
            .get()
            .into_iter()
            .filter(|c| branche.map_or(true, |id| c.branche.id == id))
            .collect();
        let mut rows = filter_list(rows, &search.get());
        sort.with(|s| sort_list(&mut rows, s.field, s.ascending));
        rows
    });

    let open_details = move |id: Option<EntityId>| {
        let branche_id = branche_filter.get_untracked();
        modal_stack.push_with_frame(
            Some("max-width: min(480px, 95vw); width: min(480px, 95vw);".to_string()),
            Some("coefficient-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! {
                    <CoefficientDetails
                        id=id
                        branche_id=branche_id
                        on_saved=on_saved
                        on_cancel=on_cancel
                    />
                }
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
        if ids.is_empty() || !dialogs::confirm(&format!("Supprimer {} coefficient(s) ?", ids.len())) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Coefficients, ids).await;
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
                    <h1 class="header__title">"Coefficients"</h1>
                </div>
                <div class="header__actions">
                    <select
                        class="header__filter"
                        on:change=move |ev| set_branche_filter.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="">"Toutes les branches"</option>
                        {move || branches.get().into_iter().map(|b| view! {
                            <option value=b.id.to_string()>{b.display()}</option>
                        }).collect_view()}
                    </select>
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouveau coefficient"
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
                            <SortHeader label="Branche" field="branche" sort=sort />
                            <SortHeader label="Matière" field="matiere" sort=sort />
                            <SortHeader label="Coefficient" field="valeur" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|c| {
                            let id = c.id;
                            view! {
                                <tr class="table__row" on:click=move |_| open_details(Some(id))>
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{c.branche.libelle}</td>
                                    <td class="table__cell">{c.matiere.libelle}</td>
                                    <td class="table__cell table__cell--number">{format_decimal(c.valeur)}</td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                    <tfoot>
                        {move || visible.with(|rows| totals_by_branche(rows)).into_iter().map(|(branche, total)| view! {
                            <tr class="table__totals-row">
                                <td class="table__cell"></td>
                                <td class="table__cell" colspan="2">{format!("Total {}", branche)}</td>
                                <td class="table__cell table__cell--number">{format_decimal(total)}</td>
                            </tr>
                        }).collect_view()}
                    </tfoot>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRef;

    fn coef(id: EntityId, branche: &str, matiere: &str, valeur: f64) -> Coefficient {
        Coefficient {
            id,
            branche: EntityRef::new(id, None, branche),
            matiere: EntityRef::new(id, None, matiere),
            valeur,
        }
    }

    #[test]
    fn totals_group_by_branch() {
        let rows = vec![
            coef(1, "6e", "Maths", 4.0),
            coef(2, "5e", "Maths", 4.0),
            coef(3, "6e", "Français", 3.5),
        ];
        assert_eq!(
            totals_by_branche(&rows),
            vec![("6e".to_string(), 7.5), ("5e".to_string(), 4.0)]
        );
    }

    #[test]
    fn sorting_by_branch_then_subject() {
        let mut rows = vec![coef(1, "6e", "Maths", 4.0), coef(2, "6e", "Anglais", 2.0)];
        sort_list(&mut rows, "branche", true);
        assert_eq!(rows[0].matiere.libelle, "Anglais");
    }
}
