use contracts::system::auth::{UpdateProfileRequest, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api::{use_api, ApiClient};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Stored session, if any. The profile is the one saved at login.
    fn from_storage() -> Self {
        match storage::get_access_token() {
            Some(token) => Self {
                access_token: Some(token),
                user_info: storage::get_profile(),
            },
            None => Self::default(),
        }
    }
}

/// Auth context provider. Restores the stored session and checks it
/// against `/auth/me`.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let api = use_api();
    let (auth_state, set_auth_state) = signal(AuthState::from_storage());

    Effect::new(move |_| {
        if auth_state.get_untracked().access_token.is_none() {
            return;
        }
        spawn_local(async move {
            match api::get_current_user(&api).await {
                Ok(user_info) => {
                    storage::save_profile(&user_info);
                    set_auth_state.update(|s| s.user_info = Some(user_info));
                }
                Err(e) if e.is_unauthorized() => {
                    log::info!("stored session expired");
                    storage::clear();
                    set_auth_state.set(AuthState::default());
                }
                // Offline or server down: keep the session, screens report errors.
                Err(e) => log::warn!("session check failed: {}", e),
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Log in and store the session. Switches the shell to the workspace.
pub async fn do_login(
    api: ApiClient,
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(&api, username, password)
        .await
        .map_err(|e| e.to_string())?;

    storage::save_access_token(&response.access_token);
    storage::save_profile(&response.user);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
    Ok(())
}

/// Server-side logout is best effort; the local session is always dropped.
pub async fn do_logout(api: ApiClient, set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout(&api).await {
        log::warn!("logout: {}", e);
    }
    storage::clear();
    api.reset();
    set_auth_state.set(AuthState::default());
}

/// Apply a saved profile to the session without a new `/auth/me` round trip.
pub fn apply_profile(set_auth_state: WriteSignal<AuthState>, profile: &UpdateProfileRequest) {
    set_auth_state.update(|s| {
        if let Some(user) = s.user_info.as_mut() {
            user.nom = profile.nom.clone();
            user.prenoms = profile.prenoms.clone();
            user.email = profile.email.clone();
            user.contact = profile.contact.clone();
            storage::save_profile(user);
        }
    });
}
