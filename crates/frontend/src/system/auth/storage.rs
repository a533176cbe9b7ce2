use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "puls_access_token";
const PROFILE_KEY: &str = "puls_profile";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_access_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
    }
}

pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Profile of the last login, shown while the session is being checked.
pub fn save_profile(user: &UserInfo) {
    let Ok(json) = serde_json::to_string(user) else {
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(PROFILE_KEY, &json);
    }
}

pub fn get_profile() -> Option<UserInfo> {
    let json = get_local_storage()?.get_item(PROFILE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

/// Forget the session.
pub fn clear() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(PROFILE_KEY);
    }
}
