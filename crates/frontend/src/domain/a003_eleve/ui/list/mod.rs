use crate::domain::a003_eleve::ui::details::EleveDetails;
use crate::shared::api::{use_api, Resource};
use crate::shared::components::TableCheckbox;
use crate::shared::crud::delete_many;
use crate::shared::date_utils::format_optional_date;
use crate::shared::dialogs;
use crate::shared::export::download_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, compare_text, filter_list, sort_list, SearchInput, Searchable, SortHeader,
    SortState, Sortable,
};
use crate::shared::modal_stack::ModalStackService;
use crate::shared::references::use_choices;
use crate::system::context::use_app_context;
use contracts::domain::a001_classe::Classe;
use contracts::domain::a003_eleve::Eleve;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub struct EleveRow {
    pub id: EntityId,
    pub matricule: String,
    pub nom: String,
    pub prenoms: String,
    pub sexe: &'static str,
    pub date_naissance: Option<chrono::NaiveDate>,
    pub classe: String,
}

impl From<Eleve> for EleveRow {
    fn from(e: Eleve) -> Self {
        Self {
            id: e.id,
            matricule: e.matricule,
            nom: e.nom,
            prenoms: e.prenoms,
            sexe: e.sexe.map(|s| s.code()).unwrap_or("-"),
            date_naissance: e.date_naissance,
            classe: e.classe.map(|c| c.display()).unwrap_or_else(|| "Non affecté".to_string()),
        }
    }
}

impl Searchable for EleveRow {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(&[&self.matricule, &self.nom, &self.prenoms, &self.classe], filter)
    }
}

impl Sortable for EleveRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "matricule" => compare_text(&self.matricule, &other.matricule),
            "nom" => compare_text(&self.nom, &other.nom)
                .then_with(|| compare_text(&self.prenoms, &other.prenoms)),
            "sexe" => self.sexe.cmp(other.sexe),
            "date_naissance" => self.date_naissance.cmp(&other.date_naissance),
            "classe" => compare_text(&self.classe, &other.classe),
            _ => Ordering::Equal,
        }
    }
}

fn rows_to_csv(rows: &[EleveRow]) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(Vec::new());
    writer
        .write_record(["Matricule", "Nom", "Prénoms", "Sexe", "Date de naissance", "Classe"])
        .map_err(|e| e.to_string())?;
    for row in rows {
        writer
            .write_record([
                row.matricule.as_str(),
                row.nom.as_str(),
                row.prenoms.as_str(),
                row.sexe,
                format_optional_date(row.date_naissance).as_str(),
                row.classe.as_str(),
            ])
            .map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

#[component]
pub fn EleveList() -> impl IntoView {
    let api = use_api();
    let app_ctx = use_app_context();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");
    let classes = use_choices::<Classe>(Resource::Classes, Classe::to_ref);

    let (items, set_items) = signal(Vec::<EleveRow>::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (selected, set_selected) = signal(HashSet::<EntityId>::new());
    let (search, set_search) = signal(String::new());
    let (classe_filter, set_classe_filter) = signal(None::<EntityId>);
    let sort = RwSignal::new(SortState::new("nom"));
    let refresh = RwSignal::new(0u32);

    Effect::new(move |_| {
        refresh.track();
        app_ctx.track();
        let classe = classe_filter.get();
        set_loading.set(true);
        spawn_local(async move {
            let endpoints = api.endpoints();
            let url = match classe {
                Some(id) => endpoints.collection_filtered(Resource::Eleves, &[("classeId", id.to_string())]),
                None => endpoints.collection(Resource::Eleves),
            };
            match api.get::<Vec<Eleve>>(&url).await {
                Ok(list) => {
                    log::debug!("eleves: {} loaded", list.len());
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
            Some("max-width: min(720px, 95vw); width: min(720px, 95vw);".to_string()),
            Some("eleve-details-modal".to_string()),
            move |handle| {
                let on_saved = Callback::new(move |_| {
                    handle.close();
                    reload();
                });
                let on_cancel = Callback::new(move |_| handle.close());
                view! { <EleveDetails id=id on_saved=on_saved on_cancel=on_cancel /> }.into_any()
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
        if ids.is_empty() || !dialogs::confirm(&format!("Supprimer {} élève(s) ?", ids.len())) {
            return;
        }
        spawn_local(async move {
            let outcome = delete_many(&api, Resource::Eleves, ids).await;
            if !outcome.all_succeeded() {
                dialogs::alert(&outcome.summary());
            }
            set_selected.set(outcome.failed_ids().into_iter().collect());
            reload();
        });
    };

    let export_csv = move |_| {
        let content = visible.with_untracked(|rows| rows_to_csv(rows));
        let result = content.and_then(|csv| download_csv(&csv, "eleves.csv"));
        if let Err(e) = result {
            dialogs::alert(&format!("Export impossible: {}", e));
        }
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Élèves"</h1>
                    <span class="header__subtitle">
                        {move || format!("{} élève(s)", visible.with(|v| v.len()))}
                    </span>
                </div>
                <div class="header__actions">
                    <select
                        class="header__filter"
                        on:change=move |ev| set_classe_filter.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="">"Toutes les classes"</option>
                        {move || classes.get().into_iter().map(|c| view! {
                            <option value=c.id.to_string() selected=classe_filter.get_untracked() == Some(c.id)>
                                {c.display()}
                            </option>
                        }).collect_view()}
                    </select>
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v| set_search.set(v))
                        placeholder="Matricule, nom, classe..."
                    />
                    <button class="button button--primary" on:click=move |_| open_details(None)>
                        {icon("plus")}
                        "Nouvel élève"
                    </button>
                    <button class="button button--secondary" on:click=move |_| reload() disabled=move || loading.get()>
                        {icon("refresh")}
                        "Actualiser"
                    </button>
                    <button class="button button--secondary" on:click=export_csv>
                        {icon("download")}
                        "Exporter"
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
                            <SortHeader label="Matricule" field="matricule" sort=sort />
                            <SortHeader label="Nom et prénoms" field="nom" sort=sort />
                            <SortHeader label="Sexe" field="sexe" sort=sort />
                            <SortHeader label="Né(e) le" field="date_naissance" sort=sort />
                            <SortHeader label="Classe" field="classe" sort=sort />
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible.get().into_iter().map(|row| {
                            let id = row.id;
                            view! {
                                <tr class="table__row" on:click=move |_| open_details(Some(id))>
                                    <TableCheckbox
                                        checked=Signal::derive(move || selected.with(|s| s.contains(&id)))
                                        on_change=Callback::new(move |checked| toggle_select(id, checked))
                                    />
                                    <td class="table__cell">{row.matricule}</td>
                                    <td class="table__cell">{format!("{} {}", row.nom, row.prenoms)}</td>
                                    <td class="table__cell">{row.sexe}</td>
                                    <td class="table__cell">{format_optional_date(row.date_naissance)}</td>
                                    <td class="table__cell">{row.classe}</td>
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
    use chrono::NaiveDate;
    use contracts::domain::common::{EntityRef, Sexe};

    fn eleve(id: EntityId, nom: &str, classe: Option<EntityRef>) -> Eleve {
        Eleve {
            id,
            matricule: format!("M{:03}", id),
            nom: nom.into(),
            prenoms: "Awa".into(),
            sexe: Some(Sexe::Feminin),
            date_naissance: NaiveDate::from_ymd_opt(2012, 9, 1),
            lieu_naissance: None,
            classe,
        }
    }

    #[test]
    fn unassigned_students_are_labelled() {
        let row = EleveRow::from(eleve(1, "Koné", None));
        assert_eq!(row.classe, "Non affecté");
        assert_eq!(row.sexe, "F");
        assert!(row.matches_filter("non aff"));
    }

    #[test]
    fn csv_export_uses_semicolons_and_display_dates() {
        let rows = vec![EleveRow::from(eleve(2, "Traoré", Some(EntityRef::new(4, None, "6e 1"))))];
        let csv = rows_to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Matricule;Nom;Prénoms;Sexe;Date de naissance;Classe")
        );
        assert_eq!(lines.next(), Some("M002;Traoré;Awa;F;01/09/2012;6e 1"));
    }
}
