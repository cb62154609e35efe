//! Farmer listing management.

use std::{fs, path::PathBuf};

use clap::{Args, Subcommand};
use haat::ids::ProductId;
use haat_app::{context::AppContext, products::ProductRequest};
use rust_decimal::Decimal;

use crate::{console, render};

#[derive(Debug, Subcommand)]
pub enum FarmSubcommand {
    /// List your products, active or not
    Products,

    /// Show one of your products
    Show(IdArg),

    /// List a new product
    Add(AddArgs),

    /// Update a product
    Update(UpdateArgs),

    /// Delete a product
    Delete(IdArg),

    /// Flip a product's active flag
    Toggle(IdArg),

    /// Attach an image to a product
    UploadImage(UploadImageArgs),
}

#[derive(Debug, Args)]
pub struct IdArg {
    /// Product id
    id: i64,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product name
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// Price per unit
    #[arg(long)]
    price: Decimal,

    /// Display unit
    #[arg(long, default_value = "kg")]
    unit: String,

    /// Quantity available
    #[arg(long)]
    qty: Decimal,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Product id
    id: i64,

    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    price: Decimal,

    #[arg(long, default_value = "kg")]
    unit: String,

    #[arg(long)]
    qty: Decimal,
}

#[derive(Debug, Args)]
pub struct UploadImageArgs {
    /// Product id
    id: i64,

    /// Image file to upload
    #[arg(long)]
    file: PathBuf,
}

pub async fn run(ctx: &AppContext, command: FarmSubcommand) -> Result<(), String> {
    match command {
        FarmSubcommand::Products => list(ctx).await,
        FarmSubcommand::Show(args) => show(ctx, args).await,
        FarmSubcommand::Add(args) => add(ctx, args).await,
        FarmSubcommand::Update(args) => update(ctx, args).await,
        FarmSubcommand::Delete(args) => delete(ctx, args).await,
        FarmSubcommand::Toggle(args) => toggle(ctx, args).await,
        FarmSubcommand::UploadImage(args) => upload_image(ctx, args).await,
    }
}

async fn list(ctx: &AppContext) -> Result<(), String> {
    let products = ctx
        .products
        .my_products()
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    if products.is_empty() {
        println!("you have no products listed");
        return Ok(());
    }

    println!("{}", render::products_table(&products));

    Ok(())
}

async fn show(ctx: &AppContext, args: IdArg) -> Result<(), String> {
    let product = ctx
        .products
        .my_product(ProductId::from_raw(args.id))
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("{}", render::product_detail(&product));

    Ok(())
}

async fn add(ctx: &AppContext, args: AddArgs) -> Result<(), String> {
    validate_listing(args.price, args.qty)?;

    let product = ctx
        .products
        .create(&ProductRequest {
            name: args.name,
            description: args.description,
            price: args.price,
            unit: args.unit,
            qty_available: args.qty,
        })
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("listed product #{}: {}", product.id, product.name);

    Ok(())
}

async fn update(ctx: &AppContext, args: UpdateArgs) -> Result<(), String> {
    validate_listing(args.price, args.qty)?;

    let product = ctx
        .products
        .update(
            ProductId::from_raw(args.id),
            &ProductRequest {
                name: args.name,
                description: args.description,
                price: args.price,
                unit: args.unit,
                qty_available: args.qty,
            },
        )
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("updated product #{}", product.id);

    Ok(())
}

async fn delete(ctx: &AppContext, args: IdArg) -> Result<(), String> {
    let confirmed = console::confirm(&format!("delete product #{}?", args.id))
        .map_err(|error| format!("failed to read answer: {error}"))?;

    if !confirmed {
        println!("kept");
        return Ok(());
    }

    ctx.products
        .delete(ProductId::from_raw(args.id))
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("deleted product #{}", args.id);

    Ok(())
}

async fn toggle(ctx: &AppContext, args: IdArg) -> Result<(), String> {
    let product = ctx
        .products
        .toggle(ProductId::from_raw(args.id))
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!(
        "product #{} is now {}",
        product.id,
        if product.active { "active" } else { "inactive" }
    );

    Ok(())
}

async fn upload_image(ctx: &AppContext, args: UploadImageArgs) -> Result<(), String> {
    let bytes =
        fs::read(&args.file).map_err(|error| format!("failed to read {:?}: {error}", args.file))?;

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or("file path has no name component")?;

    let product = ctx
        .products
        .upload_image(ProductId::from_raw(args.id), file_name, bytes)
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    println!("image attached to product #{}", product.id);

    Ok(())
}

/// The same bounds the product form enforces: positive price, non-negative
/// stock. Recovered locally; never sent to the server.
fn validate_listing(price: Decimal, qty: Decimal) -> Result<(), String> {
    if price <= Decimal::ZERO {
        return Err("price must be greater than 0".to_string());
    }

    if qty < Decimal::ZERO {
        return Err("quantity cannot be negative".to_string());
    }

    Ok(())
}
