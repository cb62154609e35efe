//! Public product browsing.

use clap::{Args, Subcommand};
use haat::ids::{FarmerId, ProductId};
use haat_app::{context::AppContext, products::ProductQuery};

use crate::{console, render};

#[derive(Debug, Subcommand)]
pub enum ProductsSubcommand {
    /// List products, optionally filtered
    List(ListArgs),

    /// Show one product
    Show(ShowArgs),

    /// List one farmer's products
    Farmer(FarmerArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Match against product names
    #[arg(long)]
    search: Option<String>,

    /// Filter by the farmer's state
    #[arg(long)]
    state: Option<String>,

    /// Filter by the farmer's district
    #[arg(long)]
    district: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Product id
    id: i64,
}

#[derive(Debug, Args)]
pub struct FarmerArgs {
    /// Farmer id
    id: i64,
}

pub async fn run(ctx: &AppContext, command: ProductsSubcommand) -> Result<(), String> {
    match command {
        ProductsSubcommand::List(args) => list(ctx, args).await,
        ProductsSubcommand::Show(args) => show(ctx, args).await,
        ProductsSubcommand::Farmer(args) => by_farmer(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: ListArgs) -> Result<(), String> {
    let products = ctx
        .products
        .list(&ProductQuery {
            search: args.search,
            state: args.state,
            district: args.district,
        })
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", render::products_table(&products));

    Ok(())
}

async fn show(ctx: &AppContext, args: ShowArgs) -> Result<(), String> {
    let product = ctx
        .products
        .get(ProductId::from_raw(args.id))
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("{}", render::product_detail(&product));

    Ok(())
}

async fn by_farmer(ctx: &AppContext, args: FarmerArgs) -> Result<(), String> {
    let products = ctx
        .products
        .by_farmer(FarmerId::from_raw(args.id))
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    if products.is_empty() {
        println!("this farmer has no products listed");
        return Ok(());
    }

    println!("{}", render::products_table(&products));

    Ok(())
}
