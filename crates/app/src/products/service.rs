//! Products service.

use async_trait::async_trait;
use haat::ids::{FarmerId, ProductId};
use mockall::automock;
use reqwest::multipart::{Form, Part};
use tracing::info;

use crate::{
    errors::ApiError,
    http::ApiClient,
    products::models::{Product, ProductQuery, ProductRequest},
};

/// HTTP client for the public and farmer-scoped product endpoints.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    http: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.http.get_query("/products", query).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.http.get(&format!("/products/{id}")).await
    }

    async fn by_farmer(&self, farmer_id: FarmerId) -> Result<Vec<Product>, ApiError> {
        self.http.get(&format!("/products/farmer/{farmer_id}")).await
    }

    async fn my_products(&self) -> Result<Vec<Product>, ApiError> {
        self.http.get("/farmer/products").await
    }

    async fn my_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.http.get(&format!("/farmer/products/{id}")).await
    }

    async fn create(&self, request: &ProductRequest) -> Result<Product, ApiError> {
        let product: Product = self.http.post("/farmer/products", request).await?;

        info!(product = %product.id, name = %product.name, "product created");

        Ok(product)
    }

    async fn update(&self, id: ProductId, request: &ProductRequest) -> Result<Product, ApiError> {
        self.http
            .put_json(&format!("/farmer/products/{id}"), request)
            .await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        self.http.delete(&format!("/farmer/products/{id}")).await?;

        info!(product = %id, "product deleted");

        Ok(())
    }

    async fn toggle(&self, id: ProductId) -> Result<Product, ApiError> {
        self.http
            .patch(&format!("/farmer/products/{id}/toggle"))
            .await
    }

    async fn upload_image(
        &self,
        id: ProductId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Product, ApiError> {
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part("file", part);

        self.http
            .post_multipart(&format!("/farmer/products/{id}/image"), form)
            .await
    }
}

/// The product operations the views depend on.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List public products with optional filters.
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError>;

    /// Fetch one public product.
    async fn get(&self, id: ProductId) -> Result<Product, ApiError>;

    /// List one farmer's public products.
    async fn by_farmer(&self, farmer_id: FarmerId) -> Result<Vec<Product>, ApiError>;

    /// List the logged-in farmer's products, active or not.
    async fn my_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch one of the logged-in farmer's products.
    async fn my_product(&self, id: ProductId) -> Result<Product, ApiError>;

    /// Create a product.
    async fn create(&self, request: &ProductRequest) -> Result<Product, ApiError>;

    /// Update a product.
    async fn update(&self, id: ProductId, request: &ProductRequest) -> Result<Product, ApiError>;

    /// Delete a product.
    async fn delete(&self, id: ProductId) -> Result<(), ApiError>;

    /// Flip a product's active flag, returning the refreshed product.
    async fn toggle(&self, id: ProductId) -> Result<Product, ApiError>;

    /// Upload a product image as multipart form data.
    async fn upload_image(
        &self,
        id: ProductId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Product, ApiError>;
}
