use contracts::system::auth::UpdateProfileRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::use_api;
use crate::shared::dialogs;
use crate::shared::icons::icon;
use crate::system::auth::api;
use crate::system::auth::context::{apply_profile, use_auth};

/// Edits the name and contact details of the signed-in user.
#[component]
pub fn ProfilePage(on_close: Callback<()>) -> impl IntoView {
    let client = use_api();
    let (auth_state, set_auth_state) = use_auth();

    let initial = auth_state.with_untracked(|s| {
        s.user_info
            .as_ref()
            .map(|u| UpdateProfileRequest {
                nom: u.nom.clone(),
                prenoms: u.prenoms.clone(),
                email: u.email.clone(),
                contact: u.contact.clone(),
            })
            .unwrap_or_default()
    });
    let username = auth_state.with_untracked(|s| {
        s.user_info
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_default()
    });

    let form = RwSignal::new(initial);
    let error = RwSignal::new(None::<String>);
    let saved = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = form.get_untracked();
        if let Err(e) = request.validate() {
            error.set(Some(e));
            return;
        }
        let request = request.normalized();
        error.set(None);
        saved.set(false);
        saving.set(true);
        spawn_local(async move {
            match api::update_profile(&client, &request).await {
                Ok(()) => {
                    apply_profile(set_auth_state, &request);
                    form.set(request);
                    saved.set(true);
                }
                Err(e) => {
                    dialogs::alert(&dialogs::save_failed_message(&e));
                    error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    let optional_text = |value: String| if value.trim().is_empty() { None } else { Some(value) };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Mon profil"</h1>
                    <span class="header__subtitle">{username}</span>
                </div>
            </div>

            <form class="details-form details-form--narrow" on:submit=submit>
                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
                <Show when=move || saved.get()>
                    <div class="success">"Profil enregistré."</div>
                </Show>

                <div class="form-group">
                    <label for="profile_nom">"Nom"</label>
                    <input
                        type="text"
                        id="profile_nom"
                        prop:value=move || form.with(|f| f.nom.clone())
                        on:input=move |ev| form.update(|f| f.nom = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="profile_prenoms">"Prénoms"</label>
                    <input
                        type="text"
                        id="profile_prenoms"
                        prop:value=move || form.with(|f| f.prenoms.clone())
                        on:input=move |ev| form.update(|f| f.prenoms = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="profile_email">"E-mail"</label>
                    <input
                        type="email"
                        id="profile_email"
                        prop:value=move || form.with(|f| f.email.clone().unwrap_or_default())
                        on:input=move |ev| form.update(|f| f.email = optional_text(event_target_value(&ev)))
                    />
                </div>

                <div class="form-group">
                    <label for="profile_contact">"Contact"</label>
                    <input
                        type="tel"
                        id="profile_contact"
                        prop:value=move || form.with(|f| f.contact.clone().unwrap_or_default())
                        on:input=move |ev| form.update(|f| f.contact = optional_text(event_target_value(&ev)))
                    />
                </div>

                <div class="details-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {icon("check")}
                        {move || if saving.get() { "Enregistrement..." } else { "Enregistrer" }}
                    </button>
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>
                        {icon("x")}
                        "Fermer"
                    </button>
                </div>
            </form>
        </div>
    }
}
