//! Choice lists for selects: reference data and small collections, both
//! served through the API client cache.

use contracts::domain::common::{EntityRef, ReferenceKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use crate::shared::api::{use_api, ApiClient, ApiError, Resource};

pub async fn fetch_reference(api: &ApiClient, kind: ReferenceKind) -> Result<Vec<EntityRef>, ApiError> {
    api.get_cached(&api.endpoints().reference(kind)).await
}

pub async fn fetch_choices<T: DeserializeOwned>(
    api: &ApiClient,
    resource: Resource,
    to_ref: fn(&T) -> EntityRef,
) -> Result<Vec<EntityRef>, ApiError> {
    let items: Vec<T> = api.get_cached(&api.endpoints().collection(resource)).await?;
    Ok(items.iter().map(to_ref).collect())
}

/// Reference list of the calling component, refetched after a scope switch.
pub fn use_reference(kind: ReferenceKind) -> ReadSignal<Vec<EntityRef>> {
    let api = use_api();
    let (items, set_items) = signal(Vec::new());
    let revision = Memo::new(move |_| api.scope_revision());
    let latest = StoredValue::new(0u64);

    Effect::new(move |_| {
        revision.track();
        let ticket = latest.get_value() + 1;
        latest.set_value(ticket);
        spawn_local(async move {
            let result = fetch_reference(&api, kind).await;
            if latest.try_get_value() != Some(ticket) {
                return;
            }
            match result {
                Ok(list) => set_items.set(list),
                Err(e) => log::warn!("{}: {}", kind.label(), e),
            }
        });
    });
    items
}

/// Collection turned into choices, e.g. classes for a select. Refetched
/// when the collection is mutated or the scope switches.
pub fn use_choices<T>(resource: Resource, to_ref: fn(&T) -> EntityRef) -> ReadSignal<Vec<EntityRef>>
where
    T: DeserializeOwned + 'static,
{
    let api = use_api();
    let (items, set_items) = signal(Vec::new());
    let revision = Memo::new(move |_| api.revision(resource));
    let latest = StoredValue::new(0u64);

    Effect::new(move |_| {
        revision.track();
        let ticket = latest.get_value() + 1;
        latest.set_value(ticket);
        spawn_local(async move {
            let result = fetch_choices(&api, resource, to_ref).await;
            if latest.try_get_value() != Some(ticket) {
                return;
            }
            match result {
                Ok(list) => set_items.set(list),
                Err(e) => log::warn!("{:?}: {}", resource, e),
            }
        });
    });
    items
}
