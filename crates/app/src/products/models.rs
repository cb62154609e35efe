//! Product models.

use haat::{
    cart::ProductSummary,
    ids::{FarmerId, ProductId},
};
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listing as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub farmer_id: FarmerId,
    pub farmer_name: String,
    pub farmer_state: Option<String>,
    pub farmer_district: Option<String>,
    pub farmer_phone: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub unit: String,
    pub qty_available: Decimal,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: Option<DateTime>,
}

impl Product {
    /// The fields the cart snapshots when this product is added.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            unit: self.unit.clone(),
            farmer_id: self.farmer_id,
            farmer_name: self.farmer_name.clone(),
            qty_available: self.qty_available,
        }
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub price: Decimal,
    pub unit: String,
    pub qty_available: Decimal,
}

/// Optional filters for the public product list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}
