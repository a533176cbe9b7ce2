use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::cache::{SystemClock, TtlCache};
use super::endpoints::{Endpoints, Resource};
use super::error::ApiError;
use super::revisions::Revisions;
use crate::shared::config::ClientConfig;
use crate::system::auth::storage;
use crate::system::context::AppContext;

/// HTTP client shared by every screen through Leptos context.
///
/// GET responses of reference data go through a [`TtlCache`]; successful
/// mutations drop the cached entries of the resources they touch and bump
/// their [`Revisions`] so dependent views refetch.
#[derive(Clone, Copy)]
pub struct ApiClient {
    endpoints: RwSignal<Endpoints>,
    cache: StoredValue<TtlCache<String, SystemClock>, LocalStorage>,
    revisions: RwSignal<Revisions>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let (protocol, hostname) = page_origin();
        let root = config.api_root((&protocol, &hostname));
        log::debug!("API root: {}", root);
        Self {
            endpoints: RwSignal::new(Endpoints::new(root)),
            cache: StoredValue::new_local(TtlCache::new(
                config.cache.reference_ttl_secs,
                SystemClock,
            )),
            revisions: RwSignal::new(Revisions::default()),
        }
    }

    /// Current endpoints (scoped once the context is resolved).
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints.get_untracked()
    }

    /// Scope every following request to `ctx`. Cached data of the previous
    /// scope is dropped.
    pub fn set_context(&self, ctx: &AppContext) {
        let scoped = self.endpoints.get_untracked().scoped(ctx);
        self.endpoints.set(scoped);
        self.cache.update_value(|c| c.clear());
        self.revisions.update(|r| r.bump_scope());
    }

    /// Back to unscoped endpoints after logout.
    pub fn reset(&self) {
        let root = self.endpoints.get_untracked().root().to_string();
        self.endpoints.set(Endpoints::new(root));
        self.cache.update_value(|c| c.clear());
        self.revisions.update(|r| r.bump_scope());
    }

    /// Reactive: changes after a scope switch.
    pub fn scope_revision(&self) -> u64 {
        self.revisions.with(|r| r.scope())
    }

    /// Reactive: changes after a mutation of `resource` or a scope switch.
    pub fn revision(&self, resource: Resource) -> (u64, u64) {
        self.revisions.with(|r| r.of(resource))
    }

    pub fn invalidate(&self, resources: &[Resource]) {
        let endpoints = self.endpoints();
        self.cache.update_value(|c| {
            for resource in resources {
                let dropped = c.invalidate_prefix(&endpoints.invalidation_prefix(*resource));
                if dropped > 0 {
                    log::debug!("cache: dropped {} entries for {:?}", dropped, resource);
                }
            }
        });
        if !resources.is_empty() {
            self.revisions.update(|r| r.bump(resources));
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let text = send(authorized(Request::get(url))).await?;
        decode(&text)
    }

    /// Like [`ApiClient::get`] but served from the cache while fresh.
    pub async fn get_cached<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let hit = self
            .cache
            .try_update_value(|c| c.get(url))
            .flatten();
        if let Some(text) = hit {
            return decode(&text);
        }
        let text = send(authorized(Request::get(url))).await?;
        let value = decode(&text)?;
        let key = url.to_string();
        self.cache.update_value(|c| c.insert(key, text));
        Ok(value)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        invalidates: &[Resource],
    ) -> Result<T, ApiError> {
        let text = send_json(authorized(Request::post(url)), body).await?;
        self.invalidate(invalidates);
        decode(&text)
    }

    /// POST whose response body is not used.
    pub async fn post_unit<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        invalidates: &[Resource],
    ) -> Result<(), ApiError> {
        send_json(authorized(Request::post(url)), body).await?;
        self.invalidate(invalidates);
        Ok(())
    }

    pub async fn put_unit<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        invalidates: &[Resource],
    ) -> Result<(), ApiError> {
        send_json(authorized(Request::put(url)), body).await?;
        self.invalidate(invalidates);
        Ok(())
    }

    pub async fn delete(&self, url: &str, invalidates: &[Resource]) -> Result<(), ApiError> {
        send(authorized(Request::delete(url))).await?;
        self.invalidate(invalidates);
        Ok(())
    }
}

/// Client provided at the application root.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided at the application root")
}

fn page_origin() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_else(|| "http:".to_string());
    let hostname = location
        .as_ref()
        .and_then(|l| l.hostname().ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());
    (protocol, hostname)
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send(builder: RequestBuilder) -> Result<String, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_body(response).await
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<String, ApiError> {
    let request = builder
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_body(response).await
}

async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if !response.ok() {
        let error = ApiError::from_response(status, &text);
        log::warn!("{} {} -> {}", status, response.url(), error);
        return Err(error);
    }
    Ok(text)
}

/// Empty bodies decode as JSON `null` so `()` and `Option<T>` targets work.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
