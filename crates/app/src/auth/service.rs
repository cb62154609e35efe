//! Auth service.

use tracing::info;

use crate::{
    auth::models::{AuthResponse, LoginRequest, SignupRequest},
    errors::ApiError,
    http::ApiClient,
};

/// Client for the `/auth` resource group. Unauthenticated; the issued token
/// is handed to the session store by the caller.
#[derive(Debug, Clone)]
pub struct AuthService {
    http: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    /// Register a new account and receive a token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or server failure; validation
    /// rejections carry the server's message.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.http.post("/auth/signup", request).await?;

        info!(email = %response.email, role = %response.role, "account created");

        Ok(response)
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or server failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.http.post("/auth/login", request).await?;

        info!(email = %response.email, role = %response.role, "logged in");

        Ok(response)
    }
}
