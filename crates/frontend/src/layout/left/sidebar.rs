//! Sidebar menu with collapsible groups.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    /// (tab key, icon)
    items: Vec<(&'static str, &'static str)>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "d400_tableau_de_bord",
            label: tab_label_for_key("d400_tableau_de_bord"),
            icon: "dashboard",
            items: vec![],
        },
        MenuGroup {
            id: "scolarite",
            label: "Scolarité",
            icon: "school",
            items: vec![
                ("a001_classe", "school"),
                ("a002_salle", "door"),
                ("a003_eleve", "users"),
            ],
        },
        MenuGroup {
            id: "pedagogie",
            label: "Pédagogie",
            icon: "book",
            items: vec![
                ("a005_matiere", "book"),
                ("a007_coefficient", "percent"),
                ("a006_evaluation", "clipboard"),
            ],
        },
        MenuGroup {
            id: "personnel",
            label: "Personnel",
            icon: "briefcase",
            items: vec![("a004_personnel", "briefcase")],
        },
        MenuGroup {
            id: "imports",
            label: "Imports",
            icon: "upload",
            items: vec![("u501_import_eleves", "upload"), ("u502_import_notes", "upload")],
        },
        MenuGroup {
            id: "affectations",
            label: "Affectations",
            icon: "link",
            items: vec![
                ("u503_affectation_eleves", "link"),
                ("u504_affectation_professeurs", "link"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded_groups = RwSignal::new(vec!["scolarite".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let has_children = !group.items.is_empty();
                let group_id = group.id.to_string();
                let gid_active = group_id.clone();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let gid_show = group_id;

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                !has_children && ctx.active.get().as_deref() == Some(gid_active.as_str())
                            }
                            style:padding-left="12px"
                            on:click=move |_| {
                                if has_children {
                                    let gid = gid_click.clone();
                                    expanded_groups.update(move |items| {
                                        if let Some(pos) = items.iter().position(|x| x == &gid) {
                                            items.remove(pos);
                                        } else {
                                            items.push(gid);
                                        }
                                    });
                                } else {
                                    ctx.open_tab(group.id, group.label);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            {has_children.then(|| view! {
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                                >
                                    {icon("chevron-right")}
                                </div>
                            })}
                        </div>

                        {has_children.then(|| {
                            let items = group.items.clone();
                            view! {
                                <Show when=move || expanded_groups.get().contains(&gid_show)>
                                    <div class="app-sidebar__children">
                                        {items.iter().map(|&(key, icon_name)| {
                                            let label = tab_label_for_key(key);
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                                                    style:padding-left="10px"
                                                    on:click=move |_| ctx.open_tab(key, label)
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_menu_entry_has_a_title() {
        for group in get_menu_groups() {
            if group.items.is_empty() {
                assert!(!tab_label_for_key(group.id).is_empty(), "{}", group.id);
            }
            for (key, _) in group.items {
                assert!(!tab_label_for_key(key).is_empty(), "{}", key);
            }
        }
    }
}
