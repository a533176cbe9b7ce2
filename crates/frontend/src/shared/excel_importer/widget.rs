use contracts::shared::import::{ImportBatch, ImportRow, ImportSchema, OutcomeSummary};
use contracts::usecases::common::{BulkImportRequest, BulkImportResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use super::export::{errors_csv, errors_file_name};
use super::flow::{FlowState, ImportFlow};
use super::parser::{parse_bytes, read_file};
use super::types::ACCEPTED_EXTENSIONS;
use crate::shared::api::{use_api, Resource};
use crate::shared::config::use_config;
use crate::shared::dialogs;
use crate::shared::export::download_csv;
use crate::shared::icons::icon;
use crate::system::context::use_app_context;

/// Upload, preview and submit one spreadsheet against `schema`.
///
/// The batch is sent to `submit_url` in one request; the button stays
/// disabled while the URL is `None` (e.g. no evaluation chosen yet).
#[component]
pub fn ImportWidget(
    schema: ImportSchema,
    #[prop(into)] title: String,
    /// Target of the bulk POST.
    #[prop(into)]
    submit_url: Signal<Option<String>>,
    /// Cached resources the import changes.
    #[prop(optional)]
    invalidates: &'static [Resource],
    /// Extra checks on the freshly validated batch.
    #[prop(optional)]
    refine: Option<Callback<ImportBatch, ImportBatch>>,
    #[prop(optional)] on_completed: Option<Callback<OutcomeSummary>>,
) -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let ctx = use_app_context();
    let max_rows = config.import.max_rows;

    let flow = RwSignal::new(ImportFlow::new(schema));
    let headers = RwSignal::new(Vec::<String>::new());
    let invalid_only = RwSignal::new(false);
    let input_id = format!("import-file-{}", schema.name);

    let handle_file_select = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Same file can be picked again after a fix.
        input.set_value("");

        let file_name = file.name();
        let mime = file.type_();
        let ticket = match flow.try_update(|f| f.select_file(file_name.clone())) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                dialogs::alert(&e.to_string());
                return;
            }
            None => return,
        };
        headers.set(Vec::new());

        spawn_local(async move {
            let result = match read_file(&file).await {
                Ok(bytes) => parse_bytes(&bytes, &file_name, &mime, max_rows),
                Err(e) => Err(e),
            };
            let sheet_headers = result
                .as_ref()
                .map(|sheet| sheet.headers.clone())
                .unwrap_or_default();
            let applied = flow
                .try_update(|f| {
                    f.parse_finished(ticket, result, |batch| {
                        if let Some(refine) = refine {
                            *batch = refine.run(std::mem::take(batch));
                        }
                    })
                })
                .unwrap_or(false);
            if applied {
                headers.set(sheet_headers);
            }
        });
    };

    let handle_submit = move |_| {
        let Some(url) = submit_url.get_untracked() else {
            return;
        };
        let rows = match flow.try_update(|f| f.begin_submit()) {
            Some(Ok(rows)) => rows,
            Some(Err(e)) => {
                dialogs::alert(&e.to_string());
                return;
            }
            None => return,
        };
        let scope = ctx.get_untracked();
        let request = BulkImportRequest {
            ecole_id: scope.ecole.id,
            annee_id: scope.annee.id,
            rows,
        };
        spawn_local(async move {
            match api
                .post::<_, BulkImportResponse>(&url, &request, invalidates)
                .await
            {
                Ok(response) => {
                    let summary = flow.try_update(|f| f.submit_succeeded(&response)).flatten();
                    if let (Some(summary), Some(cb)) = (summary, on_completed) {
                        cb.run(summary);
                    }
                }
                Err(e) => {
                    flow.update(|f| f.submit_failed(e.to_string()));
                    dialogs::alert(&format!("Échec de l'import: {}", e));
                }
            }
        });
    };

    let handle_reset = move |_| {
        let _ = flow.try_update(|f| f.reset());
        headers.set(Vec::new());
    };

    let handle_download_errors = move |_| {
        let (csv, file_name) = flow.with_untracked(|f| {
            (
                errors_csv(f.batch(), &headers.get_untracked()),
                errors_file_name(f.file_name().unwrap_or_default()),
            )
        });
        match csv {
            Ok(content) => {
                if let Err(e) = download_csv(&content, &file_name) {
                    log::error!("errors export: {}", e);
                }
            }
            Err(e) => dialogs::alert(&format!("Export impossible: {}", e)),
        }
    };

    let has_batch = move || flow.with(|f| !f.batch().is_empty());
    let has_errors = move || flow.with(|f| f.batch().invalid_or_rejected().next().is_some());

    view! {
        <div class="import-widget">
            <div class="import-widget__header">
                <h3 class="import-widget__title">{title}</h3>
            </div>

            <div class="import-widget__filebar">
                <label class="button button--primary" for=input_id.clone()>
                    {icon("file")}
                    " Choisir un fichier"
                </label>
                <input
                    id=input_id
                    type="file"
                    accept=ACCEPTED_EXTENSIONS
                    on:change=handle_file_select
                    class="hidden"
                    disabled=move || flow.with(|f| f.is_submitting())
                />
                {move || match flow.with(|f| f.file_name().map(str::to_string)) {
                    Some(name) => view! {
                        <span class="import-widget__fileinfo"><strong>{name}</strong></span>
                    }.into_any(),
                    None => view! {
                        <span class="import-widget__filehint">
                            "Formats acceptés: CSV, XLSX, XLS, ODS. La première ligne contient les en-têtes."
                        </span>
                    }.into_any(),
                }}
            </div>

            {move || flow.with(|f| f.parse_error().map(|e| e.to_string())).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                let missing = flow.with(|f| f.missing_columns().join(", "));
                (!missing.is_empty()).then(|| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">
                            {format!("Colonnes obligatoires absentes du fichier: {}", missing)}
                        </span>
                    </div>
                })
            }}

            <Show when=move || flow.with(|f| *f.state() == FlowState::Parsing)>
                <Space gap=SpaceGap::Small>
                    <Spinner />
                    <span>"Lecture du fichier..."</span>
                </Space>
            </Show>

            {move || match flow.with(|f| f.state().clone()) {
                FlowState::Completed(summary) => Some(view! {
                    <div class="import-widget__summary import-widget__summary--done">
                        {format!(
                            "Import terminé: {} ligne(s) acceptée(s), {} rejetée(s)",
                            summary.accepted,
                            summary.rejected
                        )}
                        {(summary.unreported > 0).then(|| format!(
                            ", {} sans réponse du serveur",
                            summary.unreported
                        ))}
                    </div>
                }.into_any()),
                FlowState::Failed(message) => Some(view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">
                            {format!("Dernier envoi en échec: {}. Vous pouvez réessayer.", message)}
                        </span>
                    </div>
                }.into_any()),
                _ => None,
            }}

            <Show when=has_batch>
                <div class="import-widget__toolbar">
                    <Space gap=SpaceGap::Small>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                            {move || format!("Total: {}", flow.with(|f| f.batch().total_count()))}
                        </Badge>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                            {move || format!("Valides: {}", flow.with(|f| f.batch().valid_count()))}
                        </Badge>
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                            {move || format!("Invalides: {}", flow.with(|f| f.batch().invalid_count()))}
                        </Badge>
                    </Space>
                    <Checkbox checked=invalid_only label="Lignes invalides uniquement"/>
                    <div class="import-widget__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_submit
                            disabled=Signal::derive(move || {
                                !flow.with(|f| f.can_submit()) || submit_url.get().is_none()
                            })
                        >
                            {icon("upload")}
                            {move || format!(" Importer {} ligne(s)", flow.with(|f| f.batch().valid_count()))}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=handle_download_errors
                            disabled=Signal::derive(move || !has_errors())
                        >
                            {icon("download")}
                            " Télécharger les erreurs"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=handle_reset
                            disabled=Signal::derive(move || flow.with(|f| f.is_submitting()))
                        >
                            {icon("refresh")}
                            " Recommencer"
                        </Button>
                        <Show when=move || flow.with(|f| f.is_submitting())>
                            <Space gap=SpaceGap::Small>
                                <Spinner />
                                <span>"Envoi en cours..."</span>
                            </Space>
                        </Show>
                    </div>
                </div>

                <div class="table-container">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Ligne"</th>
                                {schema
                                    .fields
                                    .iter()
                                    .map(|rule| view! { <th class="table__header-cell">{rule.label}</th> })
                                    .collect_view()}
                                <th class="table__header-cell">"Statut"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let mapping = schema.column_mapping(&headers.get());
                                let only_invalid = invalid_only.get();
                                flow.with(|f| {
                                    f.batch()
                                        .rows()
                                        .iter()
                                        .filter(|row| !only_invalid || !row.is_valid || row.is_rejected())
                                        .map(|row| {
                                            let cells = mapping
                                                .iter()
                                                .map(|m| {
                                                    let value = m
                                                        .found
                                                        .as_ref()
                                                        .and_then(|h| row.raw_values.get(h))
                                                        .cloned()
                                                        .unwrap_or_default();
                                                    view! { <td class="table__cell">{value}</td> }
                                                })
                                                .collect_view();
                                            let row_class = if row.is_valid && !row.is_rejected() {
                                                "table__row"
                                            } else {
                                                "table__row table__row--error"
                                            };
                                            view! {
                                                <tr class=row_class>
                                                    <td class="table__cell">{row.line}</td>
                                                    {cells}
                                                    <td class="table__cell">{row_status(row)}</td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}

fn row_status(row: &ImportRow) -> AnyView {
    if !row.is_valid {
        return row
            .validation_errors
            .iter()
            .map(|e| {
                let e = e.clone();
                view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>{e}</Badge>
                }
            })
            .collect_view()
            .into_any();
    }
    match &row.outcome {
        Some(outcome) if outcome.success => view! {
            <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Success>"Importé"</Badge>
        }
        .into_any(),
        Some(outcome) => {
            let message = outcome
                .message
                .clone()
                .unwrap_or_else(|| "Rejeté".to_string());
            view! {
                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>{message}</Badge>
            }
            .into_any()
        }
        None => view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Valide"</Badge>
        }
        .into_any(),
    }
}
