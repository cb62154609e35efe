//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::AuthService,
    config::{ClientConfig, ConfigError},
    errors::ApiError,
    http::ApiClient,
    orders::{HttpOrdersService, OrderWorkflow, OrdersService},
    products::{HttpProductsService, ProductsService},
    session::{SessionError, SessionStore},
    users::UsersService,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client")]
    Http(#[source] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Everything the views need, wired once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub auth: AuthService,
    pub users: UsersService,
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub workflow: Arc<OrderWorkflow>,
}

impl AppContext {
    /// Build the context from configuration, attaching the stored session
    /// token when one exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or the stored
    /// session cannot be read.
    pub fn new(config: ClientConfig) -> Result<Self, AppInitError> {
        let session = SessionStore::new(config.state_dir.clone());

        let mut http = ApiClient::new(&config).map_err(AppInitError::Http)?;
        http.set_token(session.token()?);

        let orders: Arc<dyn OrdersService> = Arc::new(HttpOrdersService::new(http.clone()));

        Ok(Self {
            auth: AuthService::new(http.clone()),
            users: UsersService::new(http.clone()),
            products: Arc::new(HttpProductsService::new(http)),
            workflow: Arc::new(OrderWorkflow::new(Arc::clone(&orders))),
            orders,
            session,
            config,
        })
    }

    /// Build the context from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration is invalid or wiring fails.
    pub fn from_env() -> Result<Self, AppInitError> {
        Self::new(ClientConfig::from_env()?)
    }
}
