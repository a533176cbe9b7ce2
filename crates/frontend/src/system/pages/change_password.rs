use contracts::system::auth::ChangePasswordRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::use_api;
use crate::shared::dialogs;
use crate::shared::icons::icon;
use crate::system::auth::api;

#[component]
pub fn ChangePasswordPage(on_close: Callback<()>) -> impl IntoView {
    let client = use_api();
    let form = RwSignal::new(ChangePasswordRequest::default());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = form.get_untracked();
        if let Err(e) = request.validate() {
            error.set(Some(e));
            return;
        }
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match api::change_password(&client, &request).await {
                Ok(()) => {
                    form.set(ChangePasswordRequest::default());
                    dialogs::alert("Mot de passe modifié.");
                    on_close.run(());
                }
                Err(e) => {
                    dialogs::alert(&dialogs::save_failed_message(&e));
                    error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Changer le mot de passe"</h1>
                </div>
            </div>

            <form class="details-form details-form--narrow" on:submit=submit>
                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

                <div class="form-group">
                    <label for="old_password">"Mot de passe actuel"</label>
                    <input
                        type="password"
                        id="old_password"
                        autocomplete="current-password"
                        prop:value=move || form.with(|f| f.old_password.clone())
                        on:input=move |ev| form.update(|f| f.old_password = event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="new_password">"Nouveau mot de passe"</label>
                    <input
                        type="password"
                        id="new_password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.new_password.clone())
                        on:input=move |ev| form.update(|f| f.new_password = event_target_value(&ev))
                    />
                    <small class="form-hint">"8 caractères minimum, avec des lettres et des chiffres."</small>
                </div>

                <div class="form-group">
                    <label for="confirm_password">"Confirmation"</label>
                    <input
                        type="password"
                        id="confirm_password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.confirm_password.clone())
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                </div>

                <div class="details-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {icon("check")}
                        {move || if saving.get() { "Enregistrement..." } else { "Enregistrer" }}
                    </button>
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>
                        {icon("x")}
                        "Annuler"
                    </button>
                </div>
            </form>
        </div>
    }
}
