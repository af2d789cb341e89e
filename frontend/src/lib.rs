pub mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use router::{mount_app, resolve, Page};

/// Installs panic and log hooks, loads runtime config, then mounts the app.
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    wasm_bindgen_futures::spawn_local(async move {
        let base_url = config::init().await;
        log::info!("Runtime config initialized (api: {})", base_url);
        mount_app();
    });
}
