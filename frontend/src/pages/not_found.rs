use crate::router::Page;
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn NotFoundPage(#[prop(into)] path: String) -> impl IntoView {
    view! {
        <Title text="Not found | Parking"/>
        <div class="min-h-screen flex items-center justify-center bg-surface px-4">
            <div class="text-center space-y-4">
                <h1 class="text-4xl font-extrabold text-fg">"Page not found"</h1>
                <p class="text-fg-muted">{format!("Nothing lives at {}", path)}</p>
                <a href=Page::Login.href() class="text-action-primary-bg">"Go to sign in"</a>
            </div>
        </div>
    }
}
