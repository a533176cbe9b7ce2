use leptos::ev::MouseEvent;
use leptos::prelude::*;

use super::state::{DualListState, Side};
use crate::shared::icons::icon;
use crate::shared::picker_aggregate::AggregatePickerResult;

/// Source/target lists with the move buttons between them.
#[component]
pub fn DualList<T>(
    state: RwSignal<DualListState<T>>,
    #[prop(into)] source_title: String,
    #[prop(into)] target_title: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView
where
    T: AggregatePickerResult + Clone + Send + Sync + 'static,
{
    let move_button = move |label: &'static str, icon_name: &'static str, action: fn(&mut DualListState<T>) -> usize, enabled: Signal<bool>| {
        view! {
            <button
                class="button button--secondary dual-list__move"
                title=label
                disabled=move || disabled.get() || !enabled.get()
                on:click=move |_| {
                    state.update(|s| {
                        action(s);
                    });
                }
            >
                {icon(icon_name)}
            </button>
        }
    };

    let has_source_selection = Signal::derive(move || state.with(|s| s.selected_count(Side::Source) > 0));
    let has_target_selection = Signal::derive(move || state.with(|s| s.selected_count(Side::Target) > 0));
    let has_source_visible = Signal::derive(move || state.with(|s| !s.visible(Side::Source).is_empty()));
    let has_target_visible = Signal::derive(move || state.with(|s| !s.visible(Side::Target).is_empty()));

    view! {
        <div class="dual-list">
            <DualListPane state=state side=Side::Source title=source_title disabled=disabled />
            <div class="dual-list__buttons">
                {move_button("Ajouter la sélection", "chevron-right", DualListState::move_selected_to_target, has_source_selection)}
                {move_button("Tout ajouter", "chevrons-right", DualListState::move_all_to_target, has_source_visible)}
                {move_button("Retirer la sélection", "chevron-left", DualListState::move_selected_to_source, has_target_selection)}
                {move_button("Tout retirer", "chevrons-left", DualListState::move_all_to_source, has_target_visible)}
            </div>
            <DualListPane state=state side=Side::Target title=target_title disabled=disabled />
        </div>
    }
}

#[component]
fn DualListPane<T>(
    state: RwSignal<DualListState<T>>,
    side: Side,
    title: String,
    disabled: Signal<bool>,
) -> impl IntoView
where
    T: AggregatePickerResult + Clone + Send + Sync + 'static,
{
    let count_label = move || {
        state.with(|s| {
            let total = s.len(side);
            let shown = s.visible(side).len();
            let selected = s.selected_count(side);
            if shown == total {
                format!("{} élément(s), {} sélectionné(s)", total, selected)
            } else {
                format!("{} / {} élément(s), {} sélectionné(s)", shown, total, selected)
            }
        })
    };

    view! {
        <div class="dual-list__pane">
            <div class="dual-list__header">
                <span class="dual-list__title">{title}</span>
                <span class="dual-list__count">{count_label}</span>
            </div>
            <input
                type="text"
                class="dual-list__filter"
                placeholder="Filtrer..."
                prop:value=move || state.with(|s| s.filter(side).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.set_filter(side, value));
                }
            />
            <ul class="dual-list__items">
                {move || {
                    state.with(|s| {
                        s.visible(side)
                            .into_iter()
                            .map(|item| {
                                let id = item.id();
                                let is_selected = s.is_selected(side, &id);
                                let id_click = id.clone();
                                let id_dbl = id;
                                view! {
                                    <li
                                        class=if is_selected {
                                            "dual-list__item dual-list__item--selected"
                                        } else {
                                            "dual-list__item"
                                        }
                                        on:mousedown=move |ev: MouseEvent| {
                                            // keep shift-click from selecting page text
                                            if ev.shift_key() {
                                                ev.prevent_default();
                                            }
                                        }
                                        on:click=move |ev: MouseEvent| {
                                            if disabled.get_untracked() {
                                                return;
                                            }
                                            let ctrl = ev.ctrl_key() || ev.meta_key();
                                            state.update(|s| s.toggle_select(side, &id_click, ctrl, ev.shift_key()));
                                        }
                                        on:dblclick=move |_| {
                                            if disabled.get_untracked() {
                                                return;
                                            }
                                            state.update(|s| {
                                                s.move_item(side, &id_dbl);
                                            });
                                        }
                                    >
                                        {item.display_name()}
                                    </li>
                                }
                            })
                            .collect_view()
                    })
                }}
            </ul>
        </div>
    }
}
