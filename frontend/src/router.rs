use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{
    api::ApiClient,
    pages::{
        admin_dashboard::AdminDashboardPage, login::LoginPage, lot_spots::LotSpotsPage,
        not_found::NotFoundPage, register::RegisterPage, user_dashboard::UserDashboardPage,
    },
};

pub const LOGIN_PATH: &str = "/";

/// Characters escaped when a value is placed in a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    Register,
    AdminDashboard,
    UserDashboard,
    LotSpots,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::AdminDashboard => "AdminDashboard",
            RouteName::UserDashboard => "UserDashboard",
            RouteName::LotSpots => "LotSpots",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub name: RouteName,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: LOGIN_PATH,
        name: RouteName::Login,
    },
    RouteDef {
        path: "/register",
        name: RouteName::Register,
    },
    RouteDef {
        path: "/admin",
        name: RouteName::AdminDashboard,
    },
    RouteDef {
        path: "/user",
        name: RouteName::UserDashboard,
    },
    RouteDef {
        path: "/admin/lot/:lot_id/spots",
        name: RouteName::LotSpots,
    },
];

/// Page selected for a URL, with any path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Register,
    AdminDashboard,
    UserDashboard,
    LotSpots { lot_id: String },
    NotFound { path: String },
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Login => RouteName::Login.as_str(),
            Page::Register => RouteName::Register.as_str(),
            Page::AdminDashboard => RouteName::AdminDashboard.as_str(),
            Page::UserDashboard => RouteName::UserDashboard.as_str(),
            Page::LotSpots { .. } => RouteName::LotSpots.as_str(),
            Page::NotFound { .. } => "NotFound",
        }
    }

    /// Path that resolves back to this page.
    pub fn href(&self) -> String {
        match self {
            Page::Login => LOGIN_PATH.to_string(),
            Page::Register => "/register".to_string(),
            Page::AdminDashboard => "/admin".to_string(),
            Page::UserDashboard => "/user".to_string(),
            Page::LotSpots { lot_id } => format!(
                "/admin/lot/{}/spots",
                utf8_percent_encode(lot_id, SEGMENT)
            ),
            Page::NotFound { path } => path.clone(),
        }
    }

    fn from_match(name: RouteName, mut params: Vec<(&'static str, String)>) -> Option<Self> {
        let mut take = |key: &str| {
            params
                .iter()
                .position(|(k, _)| *k == key)
                .map(|i| params.swap_remove(i).1)
        };
        Some(match name {
            RouteName::Login => Page::Login,
            RouteName::Register => Page::Register,
            RouteName::AdminDashboard => Page::AdminDashboard,
            RouteName::UserDashboard => Page::UserDashboard,
            RouteName::LotSpots => Page::LotSpots {
                lot_id: take("lot_id")?,
            },
        })
    }
}

/// `http://host:port/admin?x` -> `/admin?x`. Relative input is returned as is.
fn strip_origin(url: &str) -> &str {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url;
    };
    let valid_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return url;
    }
    let start = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[start..]
}

/// Drops origin, query and fragment plus one trailing slash; keeps a leading `/`.
fn normalize_path(url: &str) -> String {
    let url = strip_origin(url);
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let path = if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    };
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let expected = segments(pattern);
    let actual = segments(path);
    if expected.len() != actual.len() {
        return None;
    }
    let mut params = Vec::new();
    for (want, got) in expected.into_iter().zip(actual) {
        if let Some(key) = want.strip_prefix(':') {
            if got.is_empty() {
                return None;
            }
            let value = percent_decode_str(got).decode_utf8_lossy().into_owned();
            params.push((key, value));
        } else if !want.eq_ignore_ascii_case(got) {
            return None;
        }
    }
    Some(params)
}

/// Maps a URL to its page. Anything outside [`ROUTES`] is `NotFound`.
pub fn resolve(url: &str) -> Page {
    let path = normalize_path(url);
    ROUTES
        .iter()
        .find_map(|route| {
            match_pattern(route.path, &path).and_then(|params| Page::from_match(route.name, params))
        })
        .unwrap_or(Page::NotFound { path })
}

pub fn render_page(page: Page) -> View {
    match page {
        Page::Login => view! { <LoginPage/> }.into_view(),
        Page::Register => view! { <RegisterPage/> }.into_view(),
        Page::AdminDashboard => view! { <AdminDashboardPage/> }.into_view(),
        Page::UserDashboard => view! { <UserDashboardPage/> }.into_view(),
        Page::LotSpots { lot_id } => view! { <LotSpotsPage lot_id=lot_id/> }.into_view(),
        Page::NotFound { path } => view! { <NotFoundPage path=path/> }.into_view(),
    }
}

/// Renders whatever [`resolve`] picks for the current location.
#[component]
fn PageOutlet() -> impl IntoView {
    let location = use_location();
    let page = create_memo(move |_| resolve(&location.pathname.get()));
    move || render_page(page.get())
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    view! {
        <Router>
            <Routes>
                <Route path="/" view=PageOutlet/>
                <Route path="/*any" view=PageOutlet/>
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_static_route_resolves_to_its_page() {
        assert_eq!(resolve("/"), Page::Login);
        assert_eq!(resolve("/register"), Page::Register);
        assert_eq!(resolve("/admin"), Page::AdminDashboard);
        assert_eq!(resolve("/user"), Page::UserDashboard);
    }

    #[test]
    fn lot_spots_route_extracts_lot_id() {
        assert_eq!(
            resolve("/admin/lot/42/spots"),
            Page::LotSpots {
                lot_id: "42".into()
            }
        );
    }

    #[test]
    fn lot_id_is_percent_decoded_and_round_trips_through_href() {
        let page = resolve("/admin/lot/a%20b/spots");
        assert_eq!(
            page,
            Page::LotSpots {
                lot_id: "a b".into()
            }
        );
        assert_eq!(page.href(), "/admin/lot/a%20b/spots");
        assert_eq!(resolve(&page.href()), page);
    }

    #[test]
    fn query_fragment_and_trailing_slash_are_ignored() {
        assert_eq!(resolve("/admin/"), Page::AdminDashboard);
        assert_eq!(resolve("/user?tab=history"), Page::UserDashboard);
        assert_eq!(resolve("/register#form"), Page::Register);
        assert_eq!(
            resolve("/admin/lot/7/spots/?refresh=1"),
            Page::LotSpots { lot_id: "7".into() }
        );
        assert_eq!(resolve(""), Page::Login);
    }

    #[test]
    fn absolute_urls_resolve_by_their_path() {
        assert_eq!(resolve("http://127.0.0.1:8080/admin"), Page::AdminDashboard);
        assert_eq!(resolve("https://parking.example.com"), Page::Login);
        assert_eq!(resolve("https://parking.example.com?next=1"), Page::Login);
        assert_eq!(
            resolve("http://localhost:8080/admin/lot/9/spots#top"),
            Page::LotSpots { lot_id: "9".into() }
        );
        assert_eq!(
            resolve("/go/http://elsewhere"),
            Page::NotFound {
                path: "/go/http://elsewhere".into()
            }
        );
    }

    #[test]
    fn static_segments_match_case_insensitively() {
        assert_eq!(resolve("/ADMIN"), Page::AdminDashboard);
        assert_eq!(
            resolve("/Admin/Lot/X1/Spots"),
            Page::LotSpots { lot_id: "X1".into() }
        );
    }

    #[test]
    fn unmatched_paths_resolve_to_not_found() {
        for path in [
            "/missing",
            "/admin/lot//spots",
            "/admin/lot/42",
            "/admin/lot/42/spots/extra",
            "/user/me",
        ] {
            let page = resolve(path);
            assert_eq!(page.name(), "NotFound", "{} should not match", path);
        }
        assert_eq!(
            resolve("/missing?x=1"),
            Page::NotFound {
                path: "/missing".into()
            }
        );
    }

    #[test]
    fn resolution_is_repeatable() {
        for _ in 0..3 {
            assert_eq!(
                resolve("/admin/lot/42/spots"),
                Page::LotSpots {
                    lot_id: "42".into()
                }
            );
        }
    }

    #[test]
    fn every_route_href_resolves_back_to_its_name() {
        for route in ROUTES {
            let page = resolve(&route.path.replace(":lot_id", "1"));
            assert_eq!(page.name(), route.name.as_str());
            assert_eq!(resolve(&page.href()), page);
        }
    }

    #[test]
    fn route_paths_and_names_are_unique() {
        let paths: HashSet<&str> = ROUTES.iter().map(|r| r.path).collect();
        let names: HashSet<RouteName> = ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(paths.len(), ROUTES.len());
        assert_eq!(names.len(), ROUTES.len());
    }
}
