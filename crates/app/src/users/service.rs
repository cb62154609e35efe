//! Users service.

use crate::{
    errors::ApiError,
    http::ApiClient,
    users::models::{ProfileUpdate, UserProfile},
};

/// Client for the `/users` resource group.
#[derive(Debug, Clone)]
pub struct UsersService {
    http: ApiClient,
}

impl UsersService {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    /// Fetch the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or server failure.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.http.get("/users/me").await
    }

    /// Update the logged-in user's profile, returning the refreshed profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or server failure.
    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.http.put_json("/users/me", update).await
    }
}
