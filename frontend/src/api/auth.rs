use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
};

impl ApiClient {
    /// Exchanges credentials for a token and keeps it in the token store.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.post_json("/login", request).await?;
        self.token_store().store(&response.access_token)?;
        log::info!("Signed in as {} ({})", request.username, response.role);
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/register", request).await
    }

    /// Forgets the stored token. The backend keeps no session to end.
    pub fn logout(&self) {
        self.token_store().clear();
    }
}
