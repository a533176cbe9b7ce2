use contracts::system::context::ContexteResponse;

use crate::shared::api::{ApiClient, ApiError};

pub async fn fetch_context(api: &ApiClient) -> Result<ContexteResponse, ApiError> {
    api.get(&api.endpoints().context()).await
}
