use crate::{
    api::{use_api, ApiError, LoginRequest},
    components::error::InlineErrorMessage,
    router::Page,
    utils::location,
};
use leptos::{ev::SubmitEvent, *};
use leptos_meta::Title;

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}

/// Dashboard a freshly signed-in user lands on.
pub fn landing_page(role: &str) -> Page {
    if role.eq_ignore_ascii_case("admin") {
        Page::AdminDashboard
    } else {
        Page::UserDashboard
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);

    let api = use_api();
    let login_action = create_action(move |request: &LoginRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { api.login(&request).await.map(|response| response.role) }
    });
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(role) => {
                    error.set(None);
                    location::redirect_to(&landing_page(&role).href());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let pword = password.get_untracked();
        if let Err(err) = validate_credentials(&uname, &pword) {
            error.set(Some(err));
            return;
        }
        error.set(None);
        login_action.dispatch(LoginRequest {
            username: uname.trim().to_string(),
            password: pword,
        });
    };

    view! {
        <Title text="Sign in | Parking"/>
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Sign in to Parking"</h2>
                <form class="space-y-4" on:submit=on_submit>
                    <input
                        id="username"
                        type="text"
                        class="block w-full px-3 py-2 border border-border rounded-md"
                        placeholder="Username"
                        prop:value=username
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        id="password"
                        type="password"
                        class="block w-full px-3 py-2 border border-border rounded-md"
                        placeholder="Password"
                        prop:value=password
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <InlineErrorMessage error=error.into()/>
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full py-2 px-4 rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "No account yet? "
                    <a href=Page::Register.href() class="text-action-primary-bg">"Register"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_username_and_password() {
        assert_eq!(
            validate_credentials("  ", "pw").unwrap_err().error,
            "Username is required"
        );
        assert_eq!(
            validate_credentials("admin", "").unwrap_err().error,
            "Password is required"
        );
        assert!(validate_credentials("admin", "admin123").is_ok());
    }

    #[test]
    fn role_selects_landing_dashboard() {
        assert_eq!(landing_page("admin"), Page::AdminDashboard);
        assert_eq!(landing_page("Admin"), Page::AdminDashboard);
        assert_eq!(landing_page("user"), Page::UserDashboard);
        assert_eq!(landing_page(""), Page::UserDashboard);
    }
}
