//! Cart
//!
//! The buyer's in-memory cart: one line per product, partitionable into one
//! order submission per farmer. The cart is an explicitly owned value held
//! by the browsing session; it is never persisted and dies with its owner.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    ids::{FarmerId, ProductId},
    money::line_subtotal,
};

/// Errors surfaced by cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// The requested quantity exceeds the stock snapshot for the line.
    #[error("maximum available quantity is {available} {unit}")]
    QuantityExceedsAvailable {
        /// Quantity the caller asked for.
        requested: Decimal,
        /// Stock available when the line was added.
        available: Decimal,
        /// Display unit for the message.
        unit: String,
    },

    /// No line exists for the given product.
    #[error("product is not in the cart")]
    LineNotFound(ProductId),
}

/// The product fields the cart snapshots when a line is added.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    /// Product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Display unit, e.g. `"kg"`.
    pub unit: String,
    /// Selling farmer.
    pub farmer_id: FarmerId,
    /// Selling farmer's display name.
    pub farmer_name: String,
    /// Stock available at add-time.
    pub qty_available: Decimal,
}

/// One buyer-selected product and quantity pending order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product id; unique within the cart.
    pub product_id: ProductId,
    /// Product display name.
    pub product_name: String,
    /// Unit price snapshotted at add-time.
    pub unit_price: Decimal,
    /// Display unit.
    pub unit: String,
    /// Selling farmer; the partition key.
    pub farmer_id: FarmerId,
    /// Selling farmer's display name.
    pub farmer_name: String,
    /// Selected quantity; always > 0 and <= `max_quantity`.
    pub quantity: Decimal,
    /// Stock snapshot at add-time; a client-side bound only, the server
    /// re-checks at submission.
    pub max_quantity: Decimal,
}

impl CartLine {
    /// The line subtotal at currency precision.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price, self.quantity)
    }
}

/// The lines of one farmer's portion of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerGroup {
    /// The farmer all lines in this group belong to.
    pub farmer_id: FarmerId,
    /// The farmer's display name.
    pub farmer_name: String,
    /// The group's lines, in cart order.
    pub lines: Vec<CartLine>,
}

impl FarmerGroup {
    /// The group subtotal at currency precision.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

/// The buyer's cart.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart's lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// If a line for the product already exists its quantity is incremented,
    /// clamped at the line's stock snapshot; otherwise a new line is
    /// inserted with the snapshot taken from `product.qty_available`.
    pub fn add_item(&mut self, product: &ProductSummary, quantity: Decimal) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = (line.quantity + quantity).min(line.max_quantity);
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            unit: product.unit.clone(),
            farmer_id: product.farmer_id,
            farmer_name: product.farmer_name.clone(),
            quantity: quantity.min(product.qty_available),
            max_quantity: product.qty_available,
        });
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: no line exists for `product_id`.
    /// - [`CartError::QuantityExceedsAvailable`]: `new_quantity` exceeds the
    ///   line's stock snapshot; the line is left unchanged.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        new_quantity: Decimal,
    ) -> Result<(), CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or(CartError::LineNotFound(product_id))?;

        if new_quantity <= Decimal::ZERO {
            self.lines.remove(index);
            return Ok(());
        }

        let Some(line) = self.lines.get_mut(index) else {
            return Err(CartError::LineNotFound(product_id));
        };

        if new_quantity > line.max_quantity {
            return Err(CartError::QuantityExceedsAvailable {
                requested: new_quantity,
                available: line.max_quantity,
                unit: line.unit.clone(),
            });
        }

        line.quantity = new_quantity;

        Ok(())
    }

    /// Remove a line by product id; a no-op when absent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// The cart total: the sum of every line's subtotal.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Group the cart's lines by farmer, preserving first-seen farmer order.
    ///
    /// Every line appears in exactly one group; used for both the cart
    /// panel and checkout submission planning.
    #[must_use]
    pub fn partition_by_farmer(&self) -> Vec<FarmerGroup> {
        let mut groups: Vec<FarmerGroup> = Vec::new();
        let mut index: FxHashMap<FarmerId, usize> = FxHashMap::default();

        for line in &self.lines {
            match index.get(&line.farmer_id) {
                Some(&at) => {
                    if let Some(group) = groups.get_mut(at) {
                        group.lines.push(line.clone());
                    }
                }
                None => {
                    index.insert(line.farmer_id, groups.len());
                    groups.push(FarmerGroup {
                        farmer_id: line.farmer_id,
                        farmer_name: line.farmer_name.clone(),
                        lines: vec![line.clone()],
                    });
                }
            }
        }

        groups
    }

    /// Drop every line belonging to the given farmer.
    pub(crate) fn remove_farmer_lines(&mut self, farmer_id: FarmerId) {
        self.lines.retain(|line| line.farmer_id != farmer_id);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn tomatoes() -> ProductSummary {
        ProductSummary {
            id: ProductId::from_raw(1),
            name: "Tomatoes".to_string(),
            price: dec!(30.00),
            unit: "kg".to_string(),
            farmer_id: FarmerId::from_raw(10),
            farmer_name: "Green Acres".to_string(),
            qty_available: dec!(5),
        }
    }

    fn onions() -> ProductSummary {
        ProductSummary {
            id: ProductId::from_raw(2),
            name: "Onions".to_string(),
            price: dec!(18.50),
            unit: "kg".to_string(),
            farmer_id: FarmerId::from_raw(11),
            farmer_name: "Red Hill".to_string(),
            qty_available: dec!(20),
        }
    }

    fn spinach() -> ProductSummary {
        ProductSummary {
            id: ProductId::from_raw(3),
            name: "Spinach".to_string(),
            price: dec!(12.00),
            unit: "bunch".to_string(),
            farmer_id: FarmerId::from_raw(10),
            farmer_name: "Green Acres".to_string(),
            qty_available: dec!(8),
        }
    }

    #[test]
    fn adding_same_product_increments_one_line() -> TestResult {
        let mut cart = Cart::new();
        let product = tomatoes();

        cart.add_item(&product, dec!(1));
        cart.add_item(&product, dec!(2));

        assert_eq!(cart.len(), 1);

        let line = cart.line(product.id).ok_or("line should exist")?;
        assert_eq!(line.quantity, dec!(3));

        Ok(())
    }

    #[test]
    fn adding_past_stock_clamps_at_snapshot() -> TestResult {
        let mut cart = Cart::new();
        let product = tomatoes();

        cart.add_item(&product, dec!(4));
        cart.add_item(&product, dec!(4));

        let line = cart.line(product.id).ok_or("line should exist")?;
        assert_eq!(line.quantity, product.qty_available);

        Ok(())
    }

    #[test]
    fn update_quantity_past_snapshot_leaves_line_unchanged() -> TestResult {
        let mut cart = Cart::new();
        let product = tomatoes();

        cart.add_item(&product, dec!(2));

        let result = cart.update_quantity(product.id, dec!(6));

        assert!(
            matches!(result, Err(CartError::QuantityExceedsAvailable { .. })),
            "expected QuantityExceedsAvailable, got {result:?}"
        );

        let line = cart.line(product.id).ok_or("line should exist")?;
        assert_eq!(line.quantity, dec!(2), "failed update must not mutate");

        Ok(())
    }

    #[test]
    fn update_quantity_within_bound_sets_exactly() -> TestResult {
        let mut cart = Cart::new();
        let product = tomatoes();

        cart.add_item(&product, dec!(1));
        cart.update_quantity(product.id, dec!(4.5))?;

        let line = cart.line(product.id).ok_or("line should exist")?;
        assert_eq!(line.quantity, dec!(4.5));

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();
        let product = tomatoes();

        cart.add_item(&product, dec!(2));
        cart.update_quantity(product.id, Decimal::ZERO)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_unknown_product_errors() {
        let mut cart = Cart::new();

        let result = cart.update_quantity(ProductId::from_raw(99), dec!(1));

        assert!(
            matches!(result, Err(CartError::LineNotFound(_))),
            "expected LineNotFound, got {result:?}"
        );
    }

    #[test]
    fn remove_item_is_noop_when_absent() {
        let mut cart = Cart::new();

        cart.add_item(&tomatoes(), dec!(1));
        cart.remove_item(ProductId::from_raw(99));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn total_sums_rounded_line_subtotals() {
        let mut cart = Cart::new();

        cart.add_item(&tomatoes(), dec!(2));
        cart.add_item(&onions(), dec!(1.5));

        // 60.00 + 27.75
        assert_eq!(cart.total(), dec!(87.75));
    }

    #[test]
    fn empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), Decimal::ZERO);
    }

    #[test]
    fn partition_groups_by_first_seen_farmer_order() {
        let mut cart = Cart::new();

        cart.add_item(&tomatoes(), dec!(1));
        cart.add_item(&onions(), dec!(1));
        cart.add_item(&spinach(), dec!(1));

        let groups = cart.partition_by_farmer();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].farmer_id, FarmerId::from_raw(10));
        assert_eq!(groups[0].lines.len(), 2);
        assert_eq!(groups[1].farmer_id, FarmerId::from_raw(11));
        assert_eq!(groups[1].lines.len(), 1);
    }

    #[test]
    fn partition_covers_every_line_exactly_once() {
        let mut cart = Cart::new();

        cart.add_item(&tomatoes(), dec!(1));
        cart.add_item(&onions(), dec!(2));
        cart.add_item(&spinach(), dec!(3));

        let groups = cart.partition_by_farmer();
        let mut partitioned: Vec<CartLine> =
            groups.into_iter().flat_map(|group| group.lines).collect();

        partitioned.sort_by_key(|line| line.product_id);

        let mut original = cart.lines().to_vec();
        original.sort_by_key(|line| line.product_id);

        assert_eq!(partitioned, original);
    }

    #[test]
    fn partition_preserves_total() {
        let mut cart = Cart::new();

        cart.add_item(&tomatoes(), dec!(1.2));
        cart.add_item(&onions(), dec!(0.7));
        cart.add_item(&spinach(), dec!(4));

        let grouped: Decimal = cart
            .partition_by_farmer()
            .iter()
            .map(FarmerGroup::subtotal)
            .sum();

        assert_eq!(grouped, cart.total());
    }
}
