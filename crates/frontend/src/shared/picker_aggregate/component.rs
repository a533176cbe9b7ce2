use super::traits::TableDisplayable;
use leptos::html::Tr;
use leptos::prelude::*;

/// Modal picker choosing one item out of a list.
///
/// Click selects, double-click confirms. The row of `initial_selected_id`
/// is scrolled into view once loaded.
#[component]
pub fn GenericAggregatePicker<T>(
    items: ReadSignal<Vec<T>>,
    #[prop(optional)] error: Option<ReadSignal<Option<String>>>,
    #[prop(optional)] loading: Option<ReadSignal<bool>>,
    initial_selected_id: Option<String>,
    on_confirm: impl Fn(Option<T>) + 'static + Clone + Send,
    on_cancel: impl Fn(()) + 'static + Clone + Send,
    #[prop(optional)] title: Option<String>,
) -> impl IntoView
where
    T: TableDisplayable + Clone + Send + Sync + 'static,
{
    let (selected_id, set_selected_id) = signal::<Option<String>>(initial_selected_id.clone());
    let (filter, set_filter) = signal(String::new());
    let title = title.unwrap_or_else(|| "Sélection".to_string());

    let loading_signal = loading.unwrap_or_else(|| {
        let (r, _) = signal(false);
        r
    });
    let error_signal = error.unwrap_or_else(|| {
        let (r, _) = signal(None);
        r
    });

    let selected_row_ref = NodeRef::<Tr>::new();

    Effect::new(move |_| {
        if selected_id.get().is_some() && !loading_signal.get() {
            if let Some(element) = selected_row_ref.get() {
                element.scroll_into_view_with_bool(true);
            }
        }
    });

    let handle_confirm = {
        let on_confirm = on_confirm.clone();
        move |_| {
            let chosen = selected_id.get().and_then(|id| {
                items.with(|list| list.iter().find(|i| i.id() == id).cloned())
            });
            on_confirm(chosen);
        }
    };

    let on_confirm_dblclick = on_confirm.clone();

    view! {
        <div class="picker-container">
            <div class="picker-header">
                <h3>{title}</h3>
                <input
                    type="text"
                    class="picker-filter"
                    placeholder="Rechercher..."
                    prop:value=move || filter.get()
                    on:input=move |ev| set_filter.set(event_target_value(&ev))
                />
            </div>

            <div class="picker-content">
                {move || {
                    if loading_signal.get() {
                        view! { <div class="picker-loading">"Chargement..."</div> }.into_any()
                    } else if let Some(err) = error_signal.get() {
                        view! {
                            <div class="picker-error">
                                <p>"Erreur de chargement: " {err}</p>
                            </div>
                        }.into_any()
                    } else {
                        let needle = filter.get().trim().to_lowercase();
                        items.with(|list| {
                            let visible: Vec<&T> = list
                                .iter()
                                .filter(|item| {
                                    needle.is_empty()
                                        || item.description().to_lowercase().contains(&needle)
                                        || item.code().to_lowercase().contains(&needle)
                                })
                                .collect();
                            if visible.is_empty() {
                                return view! {
                                    <div class="picker-empty">"Aucun élément disponible"</div>
                                }.into_any();
                            }
                            view! {
                                <table class="picker-table">
                                    <thead>
                                        <tr>
                                            <th>"Code"</th>
                                            <th>"Libellé"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {visible.into_iter().map(|item| {
                                            let item_id = item.id();
                                            let id_for_class = item_id.clone();
                                            let id_for_click = item_id.clone();
                                            let item_for_dblclick = item.clone();
                                            let on_confirm = on_confirm_dblclick.clone();
                                            let is_initial = initial_selected_id.as_ref() == Some(&item_id);

                                            view! {
                                                <tr
                                                    node_ref=if is_initial { selected_row_ref } else { NodeRef::new() }
                                                    class="picker-row"
                                                    class:selected=move || selected_id.get().as_ref() == Some(&id_for_class)
                                                    on:click=move |_| set_selected_id.set(Some(id_for_click.clone()))
                                                    on:dblclick=move |_| on_confirm(Some(item_for_dblclick.clone()))
                                                >
                                                    <td>{item.code()}</td>
                                                    <td>{item.description()}</td>
                                                </tr>
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            }.into_any()
                        })
                    }
                }}
            </div>

            <div class="picker-actions">
                <button
                    class="button button--primary"
                    on:click=handle_confirm
                    disabled=move || selected_id.get().is_none()
                >
                    "Choisir"
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| on_cancel(())
                >
                    "Annuler"
                </button>
            </div>
        </div>
    }
}
