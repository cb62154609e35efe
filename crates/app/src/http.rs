//! HTTP client.
//!
//! Thin wrapper over `reqwest` that attaches the bearer token, applies the
//! configured timeout to every request, and maps non-success responses to
//! the [`ApiError`] taxonomy.

use reqwest::{Client, RequestBuilder, Response, multipart::Form};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{config::ClientConfig, errors::ApiError};

/// Authenticated JSON client for the marketplace API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from the given configuration, unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            token: None,
        })
    }

    /// Attach a bearer token to all subsequent requests.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Consume the client, attaching a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.get(self.url(path)));

        decode(request.send().await?).await
    }

    /// GET a JSON resource with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.get(self.url(path)).query(query));

        decode(request.send().await?).await
    }

    /// POST a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.post(self.url(path)).json(body));

        decode(request.send().await?).await
    }

    /// POST a multipart form, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.http.post(self.url(path)).multipart(form));

        decode(request.send().await?).await
    }

    /// PUT with no body, decoding a JSON response. The mutating verb for
    /// order transitions.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.put(self.url(path)));

        decode(request.send().await?).await
    }

    /// PUT a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.authorize(self.http.put(self.url(path)).json(body));

        decode(request.send().await?).await
    }

    /// PATCH with no body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.http.patch(self.url(path)));

        decode(request.send().await?).await
    }

    /// DELETE a resource, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or a non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(self.http.delete(self.url(path)));
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(error_from(response).await)
    }
}

/// The server's error body shape.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }

    Ok(response.json().await?)
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or(text);

    ApiError::from_status(status, message)
}
