use leptos::*;

use crate::router::{render_page, resolve};

/// Turns resource loading back on when dropped, even if the render panics.
struct SuppressResources;

impl SuppressResources {
    fn engage() -> Self {
        leptos_reactive::suppress_resource_load(true);
        SuppressResources
    }
}

impl Drop for SuppressResources {
    fn drop(&mut self) {
        leptos_reactive::suppress_resource_load(false);
    }
}

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Host-side HTML for `view`. Pages that fetch on mount render their
/// loading state and never reach the backend.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let _suppressed = SuppressResources::engage();
    with_runtime(|| view().into_view().render_to_string().to_string())
}

/// HTML of whichever page `url` resolves to.
pub fn render_url(url: &str) -> String {
    let page = resolve(url);
    render_to_string(move || render_page(page))
}
