use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Backend address used when nothing overrides it. No path prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

#[cfg(not(target_arch = "wasm32"))]
const API_BASE_URL_ENV: &str = "PARKING_API_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

/// Trims whitespace and trailing slashes; blank values count as unset.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First usable candidate wins, otherwise [`DEFAULT_API_BASE_URL`].
pub fn pick_base_url<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| normalize_base_url(&candidate))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

#[cfg(target_arch = "wasm32")]
fn read_global(object: &str, keys: &[&str]) -> Option<String> {
    let w = crate::utils::storage::window().ok()?;
    let any = js_sys::Reflect::get(&w, &object.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&obj, &(*key).into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    })
}

// window.__PARKING_ENV = { API_BASE_URL: "..." } (env.js) beats
// window.__PARKING_CONFIG = { api_base_url: "..." }.
#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<String> {
    read_global("__PARKING_ENV", &["API_BASE_URL", "api_base_url"])
        .or_else(|| read_global("__PARKING_CONFIG", &["api_base_url", "API_BASE_URL"]))
        .and_then(|url| normalize_base_url(&url))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<String> {
    std::env::var(API_BASE_URL_ENV)
        .ok()
        .and_then(|url| normalize_base_url(&url))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = crate::utils::storage::window()
        .ok()?
        .location()
        .origin()
        .ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache_base_url(value: String) -> String {
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

/// Base URL for new clients. Falls back to the default without caching it,
/// so a later [`init`] can still pick up `config.json`.
pub fn api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    pick_base_url([snapshot_from_globals()])
}

pub async fn init() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(existing);
    }
    let from_file = fetch_runtime_config()
        .await
        .and_then(|cfg| cfg.api_base_url);
    if from_file.is_none() {
        log::debug!("No runtime config found, using {}", DEFAULT_API_BASE_URL);
    }
    cache_base_url(pick_base_url([from_file]))
}
