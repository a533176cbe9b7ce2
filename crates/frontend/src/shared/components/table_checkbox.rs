use leptos::prelude::*;

/// Row checkbox cell. Clicks do not reach the row (no edit on select).
///
/// ```rust,ignore
/// <TableCheckbox
///     checked=Signal::derive(move || selected.get().contains(&id))
///     on_change=Callback::new(move |checked| toggle_select(id, checked))
/// />
/// ```
#[component]
pub fn TableCheckbox(
    checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}
