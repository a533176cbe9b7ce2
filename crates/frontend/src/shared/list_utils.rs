//! Search and sort helpers for the list screens.
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Minimum query length before a filter applies.
pub const MIN_FILTER_LEN: usize = 2;

pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive containment over a set of fields.
pub fn any_field_contains(fields: &[&str], filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Case-insensitive text ordering.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// "2.5" -> "2,5", integral values without decimals.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value).replace('.', ",")
    }
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().chars().count() < MIN_FILTER_LEN {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Sort column and direction of one list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub field: &'static str,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    /// Click on a header: flips the direction or switches column.
    pub fn toggle(&mut self, field: &'static str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field;
            self.ascending = true;
        }
    }

    pub fn indicator(&self, field: &str) -> &'static str {
        get_sort_indicator(self.field, field, self.ascending)
    }
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Clickable column header bound to a [`SortState`].
#[component]
pub fn SortHeader(
    label: &'static str,
    field: &'static str,
    sort: RwSignal<SortState>,
) -> impl IntoView {
    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            on:click=move |_| sort.update(|s| s.toggle(field))
        >
            {label}
            <span class="table__sort-indicator">{move || sort.with(|s| s.indicator(field))}</span>
        </th>
    }
}

/// Search box with a 300 ms debounce and a clear button.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Rechercher...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Dropping the pending timeout cancels it.
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(300, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let is_filter_active = move || value.get().trim().chars().count() >= MIN_FILTER_LEN;

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || if is_filter_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Effacer">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        code: &'static str,
        libelle: &'static str,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            any_field_contains(&[self.code, self.libelle], filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "libelle" => compare_text(self.libelle, other.libelle),
                _ => compare_text(self.code, other.code),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { code: "6E1", libelle: "Sixième 1" },
            Row { code: "3E2", libelle: "troisième 2" },
            Row { code: "5E1", libelle: "Cinquième 1" },
        ]
    }

    #[test]
    fn filter_ignores_short_queries() {
        assert_eq!(filter_list(rows(), "e").len(), 3);
        assert_eq!(filter_list(rows(), "TROIS").len(), 1);
        assert_eq!(filter_list(rows(), "e1").len(), 2);
    }

    #[test]
    fn sort_is_case_insensitive_and_reversible() {
        let mut list = rows();
        sort_list(&mut list, "libelle", true);
        assert_eq!(list[0].code, "5E1");
        assert_eq!(list[2].code, "3E2");
        sort_list(&mut list, "code", false);
        assert_eq!(list[0].code, "6E1");
    }

    #[test]
    fn decimals_use_french_separator() {
        assert_eq!(format_decimal(20.0), "20");
        assert_eq!(format_decimal(2.5), "2,5");
    }

    #[test]
    fn sort_state_toggles() {
        let mut state = SortState::new("code");
        assert_eq!(state.indicator("code"), " ▲");
        state.toggle("code");
        assert_eq!(state.indicator("code"), " ▼");
        state.toggle("libelle");
        assert!(state.ascending);
        assert_eq!(state.indicator("code"), " ⇅");
    }
}
