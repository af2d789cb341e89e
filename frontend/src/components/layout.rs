use crate::{api::use_api, router::LOGIN_PATH, utils::location};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn Header(#[prop(into)] home_href: String) -> impl IntoView {
    let api = use_api();
    let on_logout = move |_| {
        api.logout();
        location::redirect_to(LOGIN_PATH);
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href=home_href class="text-xl font-semibold text-fg">
                        "Parking"
                    </a>
                    <button
                        on:click=on_logout
                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                    >
                        "Log out"
                    </button>
                </div>
            </div>
        </header>
    }
}

/// Signed-in page chrome: title, header and content column.
#[component]
pub fn PageFrame(
    #[prop(into)] title: String,
    #[prop(into)] home_href: String,
    children: Children,
) -> impl IntoView {
    view! {
        <Title text=format!("{} | Parking", title)/>
        <div class="min-h-screen bg-surface">
            <Header home_href=home_href/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8 space-y-6">
                <h2 class="text-2xl font-bold text-fg">{title}</h2>
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some() fallback=|| ()>
            <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
