//! Table and value rendering for the views.

use haat::{
    cart::Cart,
    order::{Role, available_actions},
};
use haat_app::{
    orders::{BuyerStats, FarmerStats, Order},
    products::Product,
};
use jiff::civil::DateTime;
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Format an amount in the marketplace currency.
pub fn money(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::INR).to_string()
}

/// Format an optional server timestamp.
pub fn date(value: Option<&DateTime>) -> String {
    match value {
        Some(datetime) => datetime.strftime("%d %b %Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn finish(builder: Builder, money_columns: std::ops::Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(money_columns), Alignment::right());

    table.to_string()
}

/// A product list, public or farmer-scoped.
pub fn products_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Farmer", "Price", "Stock", "Active"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.farmer_name.clone(),
            format!("{} / {}", money(product.price), product.unit),
            format!("{} {}", product.qty_available, product.unit),
            if product.active { "yes" } else { "no" }.to_string(),
        ]);
    }

    finish(builder, 3..5)
}

/// One product in detail.
pub fn product_detail(product: &Product) -> String {
    let mut lines = vec![
        format!("#{} {}", product.id, product.name),
        format!("  farmer: {} (#{})", product.farmer_name, product.farmer_id),
        format!("  price: {} / {}", money(product.price), product.unit),
        format!("  stock: {} {}", product.qty_available, product.unit),
        format!("  active: {}", if product.active { "yes" } else { "no" }),
    ];

    if let Some(description) = &product.description {
        lines.push(format!("  {description}"));
    }

    if let Some(state) = &product.farmer_state {
        let district = product.farmer_district.as_deref().unwrap_or("-");
        lines.push(format!("  from: {district}, {state}"));
    }

    lines.join("\n")
}

/// An order list. The counterparty column depends on who is looking.
pub fn orders_table(orders: &[Order], role: Role) -> String {
    let counterparty = match role {
        Role::Buyer => "Farmer",
        Role::Farmer => "Buyer",
    };

    let mut builder = Builder::default();

    builder.push_record(["ID", counterparty, "Status", "Items", "Total", "Placed"]);

    for order in orders {
        let name = match role {
            Role::Buyer => order.farmer_name.as_deref(),
            Role::Farmer => order.buyer_name.as_deref(),
        };

        builder.push_record([
            order.id.to_string(),
            name.unwrap_or("-").to_string(),
            order.status.label().to_string(),
            order.items.len().to_string(),
            money(order.total_amount),
            date(order.created_at.as_ref()),
        ]);
    }

    finish(builder, 4..5)
}

/// One order in detail, with the actions the viewer may take on it.
pub fn order_detail(order: &Order, role: Role) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Order #{} - {}\n",
        order.id,
        order.status.label()
    ));

    match role {
        Role::Buyer => {
            out.push_str(&format!(
                "  farmer: {}\n",
                order.farmer_name.as_deref().unwrap_or("-")
            ));
        }
        Role::Farmer => {
            out.push_str(&format!(
                "  buyer: {}\n",
                order.buyer_name.as_deref().unwrap_or("-")
            ));

            if let Some(phone) = &order.buyer_phone {
                out.push_str(&format!("  phone: {phone}\n"));
            }

            if let Some(address) = &order.buyer_address {
                out.push_str(&format!("  deliver to: {address}\n"));
            }
        }
    }

    out.push_str(&format!("  placed: {}\n\n", date(order.created_at.as_ref())));

    let mut builder = Builder::default();

    builder.push_record(["Product", "Qty", "Price", "Subtotal"]);

    for item in &order.items {
        builder.push_record([
            item.product_name.clone(),
            item.quantity.to_string(),
            money(item.price_each),
            money(item.subtotal),
        ]);
    }

    out.push_str(&finish(builder, 2..4));
    out.push_str(&format!("\n  total: {}\n", money(order.total_amount)));

    let actions = available_actions(order.status, role);

    if !actions.is_empty() {
        let verbs: Vec<&str> = actions.iter().map(|action| action.verb()).collect();
        out.push_str(&format!("  available actions: {}\n", verbs.join(", ")));
    }

    out
}

/// The cart panel: lines grouped per farmer, with group and cart totals.
pub fn cart_panel(cart: &Cart) -> String {
    if cart.is_empty() {
        return "cart is empty".to_string();
    }

    let mut out = String::new();

    for group in cart.partition_by_farmer() {
        out.push_str(&format!("{} (#{})\n", group.farmer_name, group.farmer_id));

        let mut builder = Builder::default();

        builder.push_record(["Product", "Qty", "Price", "Subtotal"]);

        for line in &group.lines {
            builder.push_record([
                format!("#{} {}", line.product_id, line.product_name),
                format!("{} {}", line.quantity, line.unit),
                money(line.unit_price),
                money(line.subtotal()),
            ]);
        }

        out.push_str(&finish(builder, 2..4));
        out.push_str(&format!("  group total: {}\n\n", money(group.subtotal())));
    }

    out.push_str(&format!("cart total: {}", money(cart.total())));

    out
}

/// The farmer dashboard card.
pub fn farmer_stats(stats: &FarmerStats) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Total orders", &stats.total_orders.to_string()]);
    builder.push_record(["Pending", &stats.pending_orders.to_string()]);
    builder.push_record(["Confirmed", &stats.confirmed_orders.to_string()]);
    builder.push_record(["Completed", &stats.completed_orders.to_string()]);
    builder.push_record(["Rejected", &stats.rejected_orders.to_string()]);
    builder.push_record(["Total revenue", &money(stats.total_revenue)]);
    builder.push_record(["Pending revenue", &money(stats.pending_revenue)]);
    builder.push_record(["Products listed", &stats.total_products.to_string()]);
    builder.push_record(["Products active", &stats.active_products.to_string()]);

    finish(builder, 1..2)
}

/// The buyer dashboard card.
pub fn buyer_stats(stats: &BuyerStats) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Total orders", &stats.total_orders.to_string()]);
    builder.push_record(["Pending", &stats.pending_orders.to_string()]);
    builder.push_record(["Confirmed", &stats.confirmed_orders.to_string()]);
    builder.push_record(["Completed", &stats.completed_orders.to_string()]);
    builder.push_record(["Cancelled", &stats.cancelled_orders.to_string()]);
    builder.push_record(["Total spent", &money(stats.total_spent)]);
    builder.push_record(["Pending amount", &money(stats.pending_amount)]);

    finish(builder, 1..2)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn money_formats_in_rupees() {
        let formatted = money(dec!(1234.50));

        assert!(formatted.contains("1,234.50"), "got {formatted:?}");
    }

    #[test]
    fn missing_date_renders_dash() {
        assert_eq!(date(None), "-");
    }
}
