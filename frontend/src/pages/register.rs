use crate::{
    api::{use_api, ApiError, RegisterRequest},
    components::error::InlineErrorMessage,
    router::Page,
    utils::location,
};
use leptos::{ev::SubmitEvent, *};
use leptos_meta::Title;

pub fn build_request(
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ApiError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }
    let email = email.trim();
    Ok(RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        email: (!email.is_empty()).then(|| email.to_string()),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let username = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<ApiError>);

    let api = use_api();
    let register_action = create_action(move |request: &RegisterRequest| {
        let api = api.clone();
        let request = request.clone();
        async move { api.register(&request).await }
    });
    let pending = register_action.pending();

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(_) => location::redirect_to(&Page::Login.href()),
                Err(err) => error.set(Some(err)),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        match build_request(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
        ) {
            Ok(request) => {
                error.set(None);
                register_action.dispatch(request);
            }
            Err(err) => error.set(Some(err)),
        }
    };

    view! {
        <Title text="Register | Parking"/>
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Create an account"</h2>
                <form class="space-y-4" on:submit=on_submit>
                    <input
                        type="text"
                        class="block w-full px-3 py-2 border border-border rounded-md"
                        placeholder="Username"
                        prop:value=username
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        type="email"
                        class="block w-full px-3 py-2 border border-border rounded-md"
                        placeholder="Email (optional)"
                        prop:value=email
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
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
                        "Register"
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    <a href=Page::Login.href() class="text-action-primary-bg">"Back to sign in"</a>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_omitted() {
        let request = build_request(" bob ", "  ", "secret").unwrap();
        assert_eq!(request.username, "bob");
        assert!(request.email.is_none());
    }

    #[test]
    fn email_is_trimmed_when_given() {
        let request = build_request("bob", " bob@example.com ", "secret").unwrap();
        assert_eq!(request.email.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        assert!(build_request("", "", "secret").is_err());
        assert!(build_request("bob", "", "").is_err());
    }
}
