use contracts::system::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, UpdateProfileRequest, UserInfo,
};

use crate::shared::api::{ApiClient, ApiError};

pub async fn login(
    api: &ApiClient,
    username: String,
    password: String,
) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    api.post(&api.endpoints().login(), &request, &[]).await
}

/// Current user of the stored token. A 401 means the session is over.
pub async fn get_current_user(api: &ApiClient) -> Result<UserInfo, ApiError> {
    api.get(&api.endpoints().me()).await
}

pub async fn logout(api: &ApiClient) -> Result<(), ApiError> {
    api.post_unit(&api.endpoints().logout(), &(), &[]).await
}

pub async fn change_password(
    api: &ApiClient,
    request: &ChangePasswordRequest,
) -> Result<(), ApiError> {
    api.post_unit(&api.endpoints().change_password(), request, &[])
        .await
}

pub async fn update_profile(
    api: &ApiClient,
    request: &UpdateProfileRequest,
) -> Result<(), ApiError> {
    api.put_unit(&api.endpoints().profile(), request, &[]).await
}
