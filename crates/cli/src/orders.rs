//! Order views for both roles.
//!
//! Every view renders from server state, and every list filter is a fresh
//! server fetch. Transition commands confirm interactively, then hand off
//! to the workflow, which re-fetches the order before it is rendered.

use clap::{Args, Subcommand};
use haat::{
    ids::OrderId,
    order::{OrderAction, OrderStatus, Role, available_actions},
};
use haat_app::{context::AppContext, orders::Order};

use crate::{console, render};

#[derive(Debug, Subcommand)]
pub enum BuyerSubcommand {
    /// List your orders, optionally filtered by status
    List(StatusArg),

    /// Show one order
    Show(IdArg),

    /// Cancel a pending order
    Cancel(ActionArgs),

    /// Your past orders
    History,

    /// Your pending orders
    Pending,
}

#[derive(Debug, Subcommand)]
pub enum FarmerSubcommand {
    /// List received orders, optionally filtered by status
    List(StatusArg),

    /// Show one received order
    Show(IdArg),

    /// Confirm a pending order
    Confirm(ActionArgs),

    /// Reject a pending order
    Reject(ActionArgs),

    /// Complete a confirmed order
    Complete(ActionArgs),

    /// Your completed sales
    Sales,
}

#[derive(Debug, Args)]
pub struct StatusArg {
    /// PENDING, CONFIRMED, REJECTED, CANCELLED or COMPLETED; all when omitted
    #[arg(long)]
    status: Option<OrderStatus>,
}

#[derive(Debug, Args)]
pub struct IdArg {
    /// Order id
    id: i64,
}

#[derive(Debug, Args)]
pub struct ActionArgs {
    /// Order id
    id: i64,

    /// Skip the interactive confirmation
    #[arg(long)]
    yes: bool,
}

pub async fn run_buyer(ctx: &AppContext, command: BuyerSubcommand) -> Result<(), String> {
    match command {
        BuyerSubcommand::List(args) => {
            let orders = ctx
                .orders
                .buyer_orders(args.status)
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            list(&orders, Role::Buyer);

            Ok(())
        }
        BuyerSubcommand::Show(args) => {
            let order = fetch(ctx, Role::Buyer, OrderId::from_raw(args.id)).await?;

            println!("{}", render::order_detail(&order, Role::Buyer));

            Ok(())
        }
        BuyerSubcommand::Cancel(args) => act(ctx, Role::Buyer, OrderAction::Cancel, args).await,
        BuyerSubcommand::History => {
            let orders = ctx
                .orders
                .order_history()
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            list(&orders, Role::Buyer);

            Ok(())
        }
        BuyerSubcommand::Pending => {
            let orders = ctx
                .orders
                .pending_orders()
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            list(&orders, Role::Buyer);

            Ok(())
        }
    }
}

pub async fn run_farmer(ctx: &AppContext, command: FarmerSubcommand) -> Result<(), String> {
    match command {
        FarmerSubcommand::List(args) => {
            let orders = ctx
                .orders
                .farmer_orders(args.status)
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            list(&orders, Role::Farmer);

            Ok(())
        }
        FarmerSubcommand::Show(args) => {
            let order = fetch(ctx, Role::Farmer, OrderId::from_raw(args.id)).await?;

            println!("{}", render::order_detail(&order, Role::Farmer));

            Ok(())
        }
        FarmerSubcommand::Confirm(args) => act(ctx, Role::Farmer, OrderAction::Confirm, args).await,
        FarmerSubcommand::Reject(args) => act(ctx, Role::Farmer, OrderAction::Reject, args).await,
        FarmerSubcommand::Complete(args) => {
            act(ctx, Role::Farmer, OrderAction::Complete, args).await
        }
        FarmerSubcommand::Sales => {
            let orders = ctx
                .orders
                .sales_history()
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            list(&orders, Role::Farmer);

            Ok(())
        }
    }
}

fn list(orders: &[Order], role: Role) {
    if orders.is_empty() {
        println!("no orders");
        return;
    }

    println!("{}", render::orders_table(orders, role));
}

async fn fetch(ctx: &AppContext, role: Role, id: OrderId) -> Result<Order, String> {
    let result = match role {
        Role::Buyer => ctx.orders.buyer_order(id).await,
        Role::Farmer => ctx.orders.farmer_order(id).await,
    };

    result.map_err(|error| console::api_failure(&ctx.session, &error))
}

/// Fetch, offer, confirm, invoke, render. The offer step means an action
/// the state machine does not list is refused before any prompt.
async fn act(
    ctx: &AppContext,
    role: Role,
    action: OrderAction,
    args: ActionArgs,
) -> Result<(), String> {
    let order = fetch(ctx, role, OrderId::from_raw(args.id)).await?;

    if !available_actions(order.status, role).contains(&action) {
        return Err(format!(
            "cannot {action} order #{}: it is {}",
            order.id,
            order.status.label()
        ));
    }

    if !args.yes {
        let question = format!("{action} order #{}? This cannot be undone.", order.id);
        let confirmed =
            console::confirm(&question).map_err(|error| format!("failed to read answer: {error}"))?;

        if !confirmed {
            println!("left order #{} as {}", order.id, order.status.label());
            return Ok(());
        }
    }

    let refreshed = ctx
        .workflow
        .invoke(&order, role, action)
        .await
        .map_err(|error| match error {
            haat_app::orders::WorkflowError::Api(api_error) => {
                console::api_failure(&ctx.session, &api_error)
            }
            other => other.to_string(),
        })?;

    println!("{}", render::order_detail(&refreshed, role));

    Ok(())
}
