use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Opened tabs and sidebar visibility.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Keeps `?active=<tab key>` in the address bar so a reload reopens the tab.
    pub fn init_router_integration(&self, default_key: &str) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        let initial = params
            .get("active")
            .cloned()
            .unwrap_or_else(|| default_key.to_string());
        self.open_tab(&initial, super::tabs::tab_label_for_key(&initial));

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: {}", key);
        self.opened.update(|tabs| open_in(tabs, key, title));
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: {}", key);
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        let next = self.opened.try_update(|tabs| close_in(tabs, key)).flatten();
        if was_active {
            self.active.set(next);
        }
    }

    /// Closes every tab; used on logout.
    pub fn close_all(&self) {
        self.opened.set(Vec::new());
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

fn open_in(tabs: &mut Vec<Tab>, key: &str, title: &str) {
    if !tabs.iter().any(|tab| tab.key == key) {
        tabs.push(Tab {
            key: key.to_string(),
            title: title.to_string(),
        });
    }
}

/// Removes `key`; returns the tab to activate next (the last one left).
fn close_in(tabs: &mut Vec<Tab>, key: &str) -> Option<String> {
    tabs.retain(|tab| tab.key != key);
    tabs.last().map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_twice_keeps_one_tab() {
        let mut tabs = Vec::new();
        open_in(&mut tabs, "a001_classe", "Classes");
        open_in(&mut tabs, "a002_salle", "Salles");
        open_in(&mut tabs, "a001_classe", "Classes");
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn closing_falls_back_to_last_tab() {
        let mut tabs = Vec::new();
        open_in(&mut tabs, "a", "A");
        open_in(&mut tabs, "b", "B");
        open_in(&mut tabs, "c", "C");
        assert_eq!(close_in(&mut tabs, "c"), Some("b".to_string()));
        assert_eq!(close_in(&mut tabs, "a"), Some("b".to_string()));
        assert_eq!(close_in(&mut tabs, "b"), None);
    }
}
