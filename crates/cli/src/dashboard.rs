//! Dashboard views.

use haat::order::Role;
use haat_app::context::AppContext;

use crate::{console, render};

pub async fn run(ctx: &AppContext) -> Result<(), String> {
    let role = ctx
        .session
        .role()
        .map_err(|error| format!("failed to read session: {error}"))?
        .ok_or("not logged in")?;

    match role {
        Role::Buyer => {
            let stats = ctx
                .orders
                .buyer_stats()
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            println!("{}", render::buyer_stats(&stats));
        }
        Role::Farmer => {
            let stats = ctx
                .orders
                .farmer_stats()
                .await
                .map_err(|error| console::api_failure(&ctx.session, &error))?;

            println!("{}", render::farmer_stats(&stats));
        }
    }

    Ok(())
}
