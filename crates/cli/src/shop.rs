//! The interactive shop session.
//!
//! Owns the ephemeral cart: it lives for exactly as long as this loop and
//! is never written anywhere. Quitting, or a full checkout, ends with an
//! empty cart either way.

use std::sync::Arc;

use haat::{
    cart::Cart,
    ids::ProductId,
    order::Role,
};
use haat_app::{
    context::AppContext,
    orders::CreateOrderRequest,
    products::ProductQuery,
};
use rust_decimal::Decimal;

use crate::{console, render};

const HELP: &str = "\
commands:
  browse              list available products
  add <id> [qty]      add a product to the cart (default qty 1)
  set <id> <qty>      change a line's quantity (0 removes it)
  rm <id>             remove a line
  cart                show the cart, grouped by farmer
  checkout            place one order per farmer
  quit                leave the shop (the cart is discarded)";

#[derive(Debug, PartialEq)]
enum ShopCommand {
    Browse,
    Add { id: i64, qty: Decimal },
    Set { id: i64, qty: Decimal },
    Remove { id: i64 },
    Cart,
    Checkout,
    Help,
    Quit,
    Empty,
}

pub async fn run(ctx: &AppContext) -> Result<(), String> {
    let role = ctx
        .session
        .role()
        .map_err(|error| format!("failed to read session: {error}"))?
        .ok_or("not logged in")?;

    if role != Role::Buyer {
        return Err("only buyers can shop".to_string());
    }

    println!("{HELP}");

    let mut cart = Cart::new();

    loop {
        let line = console::read_line("shop> ")
            .map_err(|error| format!("failed to read input: {error}"))?;

        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShopCommand::Browse => browse(ctx).await,
            ShopCommand::Add { id, qty } => add(ctx, &mut cart, id, qty).await,
            ShopCommand::Set { id, qty } => set(&mut cart, id, qty),
            ShopCommand::Remove { id } => {
                cart.remove_item(ProductId::from_raw(id));
                println!("removed");
            }
            ShopCommand::Cart => println!("{}", render::cart_panel(&cart)),
            ShopCommand::Checkout => {
                if checkout(ctx, &mut cart).await {
                    break;
                }
            }
            ShopCommand::Help => println!("{HELP}"),
            ShopCommand::Quit => break,
            ShopCommand::Empty => {}
        }
    }

    Ok(())
}

async fn browse(ctx: &AppContext) {
    match ctx.products.list(&ProductQuery::default()).await {
        Ok(products) => {
            let available: Vec<_> = products.into_iter().filter(|product| product.active).collect();

            if available.is_empty() {
                println!("nothing on sale right now");
            } else {
                println!("{}", render::products_table(&available));
            }
        }
        Err(error) => println!("{}", console::api_failure(&ctx.session, &error)),
    }
}

async fn add(ctx: &AppContext, cart: &mut Cart, id: i64, qty: Decimal) {
    if qty <= Decimal::ZERO {
        println!("quantity must be greater than 0");
        return;
    }

    let product = match ctx.products.get(ProductId::from_raw(id)).await {
        Ok(product) => product,
        Err(error) => {
            println!("{}", console::api_failure(&ctx.session, &error));
            return;
        }
    };

    if !product.active {
        println!("{} is not on sale", product.name);
        return;
    }

    if product.qty_available <= Decimal::ZERO {
        println!("{} is out of stock", product.name);
        return;
    }

    cart.add_item(&product.summary(), qty);

    match cart.line(product.id) {
        Some(line) => println!("{} x{} in cart", line.product_name, line.quantity),
        None => println!("added"),
    }
}

fn set(cart: &mut Cart, id: i64, qty: Decimal) {
    match cart.update_quantity(ProductId::from_raw(id), qty) {
        Ok(()) => println!("{}", render::cart_panel(cart)),
        // Recovered inline; the line keeps its previous quantity.
        Err(error) => println!("{error}"),
    }
}

/// Returns true when the session should end (everything was ordered).
async fn checkout(ctx: &AppContext, cart: &mut Cart) -> bool {
    if cart.is_empty() {
        println!("cart is empty");
        return false;
    }

    let groups = cart.partition_by_farmer();

    println!("{}", render::cart_panel(cart));

    let question = format!(
        "place {} order(s) totalling {}?",
        groups.len(),
        render::money(cart.total())
    );

    match console::confirm(&question) {
        Ok(true) => {}
        Ok(false) => {
            println!("not ordered");
            return false;
        }
        Err(error) => {
            println!("failed to read answer: {error}");
            return false;
        }
    }

    let planned = groups.len();

    let report = cart
        .checkout(|submission| {
            let orders = Arc::clone(&ctx.orders);
            async move {
                orders
                    .create_order(&CreateOrderRequest::from(submission))
                    .await
            }
        })
        .await;

    for order in &report.created {
        println!(
            "order #{} placed with {}",
            order.id,
            order.farmer_name.as_deref().unwrap_or("farmer")
        );
    }

    match &report.failure {
        None => {
            println!("all {planned} order(s) placed");
            true
        }
        Some(failure) => {
            println!(
                "placed {} of {planned} order(s); submitting to {} failed: {}",
                report.succeeded(),
                failure.farmer_name,
                console::api_failure(&ctx.session, &failure.cause)
            );
            println!("the unsubmitted items are still in your cart; `checkout` to retry");
            false
        }
    }
}

fn parse(line: &str) -> Result<ShopCommand, String> {
    let mut words = line.split_whitespace();

    let Some(keyword) = words.next() else {
        return Ok(ShopCommand::Empty);
    };

    let command = match keyword {
        "browse" => ShopCommand::Browse,
        "add" => {
            let id = parse_id(words.next())?;
            let qty = match words.next() {
                Some(raw) => parse_qty(raw)?,
                None => Decimal::ONE,
            };
            ShopCommand::Add { id, qty }
        }
        "set" => {
            let id = parse_id(words.next())?;
            let qty = parse_qty(words.next().ok_or("usage: set <id> <qty>")?)?;
            ShopCommand::Set { id, qty }
        }
        "rm" | "remove" => ShopCommand::Remove {
            id: parse_id(words.next())?,
        },
        "cart" => ShopCommand::Cart,
        "checkout" => ShopCommand::Checkout,
        "help" | "?" => ShopCommand::Help,
        "quit" | "exit" | "q" => ShopCommand::Quit,
        other => return Err(format!("unknown command {other:?}; try `help`")),
    };

    if words.next().is_some() {
        return Err("too many arguments; try `help`".to_string());
    }

    Ok(command)
}

fn parse_id(word: Option<&str>) -> Result<i64, String> {
    let raw = word.ok_or("expected a product id")?;

    raw.parse().map_err(|_| format!("{raw:?} is not a product id"))
}

fn parse_qty(raw: &str) -> Result<Decimal, String> {
    let qty: Decimal = raw
        .parse()
        .map_err(|_| format!("{raw:?} is not a quantity"))?;

    if qty < Decimal::ZERO {
        return Err("quantity cannot be negative".to_string());
    }

    Ok(qty)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn parses_add_with_default_quantity() {
        assert_eq!(
            parse("add 3"),
            Ok(ShopCommand::Add {
                id: 3,
                qty: Decimal::ONE
            })
        );
    }

    #[test]
    fn parses_fractional_quantities() {
        assert_eq!(
            parse("set 3 0.5"),
            Ok(ShopCommand::Set {
                id: 3,
                qty: dec!(0.5)
            })
        );
    }

    #[test]
    fn rejects_negative_quantity() {
        assert!(parse("add 3 -1").is_err());
    }

    #[test]
    fn rejects_trailing_arguments() {
        assert!(parse("cart now").is_err());
    }

    #[test]
    fn blank_input_is_ignored() {
        assert_eq!(parse("   "), Ok(ShopCommand::Empty));
    }

    #[test]
    fn unknown_command_points_at_help() {
        let result = parse("buy 3");

        assert!(
            matches!(&result, Err(message) if message.contains("help")),
            "expected a help hint, got {result:?}"
        );
    }
}
