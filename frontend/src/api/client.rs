use std::rc::Rc;

use leptos::use_context;
use reqwest::{Client, Method, Request, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    token::{bearer_token, LocalStorageTokens, TokenStore},
    types::ApiError,
};
use crate::{config, router, utils::location};

/// HTTP client bound to one backend address and one token store.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Rc<dyn TokenStore>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::new_with_base_url(config::api_base_url())
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: config::pick_base_url([Some(base_url.into())]),
            tokens: Rc::new(LocalStorageTokens),
        }
    }

    pub fn with_token_store(mut self, tokens: Rc<dyn TokenStore>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }

    /// Joins the base address and `path` with a single `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request hook: sets `Authorization: Bearer <token>` when a token is
    /// stored, otherwise leaves the request untouched.
    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match bearer_token(self.token_store()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, self.url(path)))
    }

    /// Builds without sending, e.g. to inspect the resolved URL and headers.
    pub fn build(&self, method: Method, path: &str) -> Result<Request, ApiError> {
        self.request(method, path)
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            location::redirect_unless_on(router::LOGIN_PATH);
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        log::debug!("{} {}", method, path);
        let response = builder.send().await.map_err(|e| {
            log::error!("{} {} failed: {}", method, path, e);
            ApiError::request_failed(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        self.handle_unauthorized_status(status);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))
        } else {
            let error = ApiError::from_status(status.as_u16(), &body);
            log::warn!("{} {} rejected ({}): {}", method, path, status, error);
            Err(error)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path);
        self.send_json(Method::GET, path, builder).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send_json(Method::POST, path, builder).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        self.send_json(Method::PUT, path, builder).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::DELETE, path);
        self.send_json(Method::DELETE, path, builder).await
    }
}

/// Client provided by the app root, or a fresh one outside of it.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::token::MemoryTokens;
    use reqwest::header::AUTHORIZATION;

    fn client_with(tokens: MemoryTokens) -> ApiClient {
        ApiClient::new_with_base_url(config::DEFAULT_API_BASE_URL).with_token_store(Rc::new(tokens))
    }

    fn auth_header(request: &Request) -> Option<String> {
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn relative_paths_resolve_against_bare_base_address() {
        let api = client_with(MemoryTokens::default());
        assert_eq!(api.base_url(), "http://127.0.0.1:5000");
        let request = api.build(Method::POST, "/login").unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:5000/login");
        assert_eq!(api.url("admin/lots"), "http://127.0.0.1:5000/admin/lots");
    }

    #[test]
    fn trailing_slash_in_base_is_not_doubled() {
        let api = ApiClient::new_with_base_url("http://localhost:5000/");
        assert_eq!(api.url("/user/lots"), "http://localhost:5000/user/lots");
    }

    #[test]
    fn blank_base_falls_back_to_default_address() {
        let api = ApiClient::new_with_base_url("  ");
        assert_eq!(api.base_url(), config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn stored_token_becomes_bearer_header() {
        let api = client_with(MemoryTokens::with_token("abc123"));
        let request = api.build(Method::GET, "/admin/lots").unwrap();
        assert_eq!(auth_header(&request).as_deref(), Some("Bearer abc123"));
    }

    #[test]
    fn missing_token_leaves_request_unmodified() {
        let api = client_with(MemoryTokens::default());
        let request = api.build(Method::GET, "/user/lots").unwrap();
        assert!(auth_header(&request).is_none());

        let blank = client_with(MemoryTokens::with_token(""));
        let request = blank.build(Method::GET, "/user/lots").unwrap();
        assert!(auth_header(&request).is_none());
    }

    #[test]
    fn header_injection_is_repeatable_and_tracks_the_store() {
        let tokens = MemoryTokens::with_token("abc123");
        let api = client_with(tokens.clone());

        let first = api.build(Method::GET, "/user/lots").unwrap();
        let second = api.build(Method::GET, "/user/lots").unwrap();
        assert_eq!(auth_header(&first), auth_header(&second));
        assert_eq!(first.url(), second.url());

        tokens.store("rotated").unwrap();
        let third = api.build(Method::GET, "/user/lots").unwrap();
        assert_eq!(auth_header(&third).as_deref(), Some("Bearer rotated"));

        tokens.clear();
        let fourth = api.build(Method::GET, "/user/lots").unwrap();
        assert!(auth_header(&fourth).is_none());
    }
}
