use super::storage::window;

pub fn current_path() -> Option<String> {
    window().ok()?.location().pathname().ok()
}

/// Full page navigation. Does nothing outside the browser.
pub fn redirect_to(href: &str) {
    if let Ok(window) = window() {
        let _ = window.location().set_href(href);
    }
}

/// Like [`redirect_to`], but skips the reload when already on `href`.
pub fn redirect_unless_on(href: &str) {
    if current_path().as_deref() == Some(href) {
        return;
    }
    redirect_to(href);
}
