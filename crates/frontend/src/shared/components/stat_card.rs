use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Success,
    Warning,
}

/// "12 345" with a non-breaking space as thousands separator.
pub fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// None while loading or after an error
    #[prop(into)]
    value: Signal<Option<i64>>,
    #[prop(into, optional)] tone: Signal<CardTone>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let tone_class = move || match tone.get() {
        CardTone::Success => "stat-card stat-card--success",
        CardTone::Warning => "stat-card stat-card--warning",
        CardTone::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_thousands(v),
        None => "-".to_string(),
    };

    view! {
        <div class=tone_class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_use_non_breaking_spaces() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(12345), "12\u{00a0}345");
        assert_eq!(format_thousands(-1234567), "-1\u{00a0}234\u{00a0}567");
    }
}
