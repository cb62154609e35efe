//! Session commands.

use clap::{Args, Subcommand};
use haat::order::Role;
use haat_app::{
    auth::{LoginRequest, SignupRequest},
    context::AppContext,
    http::ApiClient,
    users::{ProfileUpdate, UsersService},
};

use crate::console;

#[derive(Debug, Subcommand)]
pub enum AuthSubcommand {
    /// Create an account and start a session
    Signup(SignupArgs),

    /// Log in and store the session
    Login(LoginArgs),

    /// Clear the stored session
    Logout,

    /// Show the logged-in profile
    Whoami,

    /// Update profile fields
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Password; prompted for when omitted
    #[arg(long)]
    password: Option<String>,

    /// BUYER or FARMER
    #[arg(long)]
    role: Role,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    district: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Password; prompted for when omitted
    #[arg(long)]
    password: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    district: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

pub async fn run(ctx: &AppContext, command: AuthSubcommand) -> Result<(), String> {
    match command {
        AuthSubcommand::Signup(args) => signup(ctx, args).await,
        AuthSubcommand::Login(args) => login(ctx, args).await,
        AuthSubcommand::Logout => logout(ctx),
        AuthSubcommand::Whoami => whoami(ctx),
        AuthSubcommand::Update(args) => update(ctx, args).await,
    }
}

async fn signup(ctx: &AppContext, args: SignupArgs) -> Result<(), String> {
    let password = password_or_prompt(args.password)?;

    let response = ctx
        .auth
        .signup(&SignupRequest {
            name: args.name,
            email: args.email,
            password,
            role: args.role,
            address: args.address,
            state: args.state,
            district: args.district,
            phone: args.phone,
        })
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    store_session(ctx, &response.token).await?;

    println!("welcome, {} ({})", response.name, response.role);

    Ok(())
}

async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let password = password_or_prompt(args.password)?;

    let response = ctx
        .auth
        .login(&LoginRequest {
            email: args.email,
            password,
        })
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    store_session(ctx, &response.token).await?;

    println!("logged in as {} ({})", response.name, response.role);

    Ok(())
}

/// Fetch the full profile with the fresh token and persist both session keys.
async fn store_session(ctx: &AppContext, token: &str) -> Result<(), String> {
    let http = ApiClient::new(&ctx.config)
        .map_err(|error| format!("failed to build client: {error}"))?
        .with_token(token);

    let profile = UsersService::new(http)
        .me()
        .await
        .map_err(|error| format!("failed to fetch profile: {error}"))?;

    ctx.session
        .save(token, &profile)
        .map_err(|error| format!("failed to store session: {error}"))
}

fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.session
        .clear()
        .map_err(|error| format!("failed to clear session: {error}"))?;

    println!("logged out");

    Ok(())
}

fn whoami(ctx: &AppContext) -> Result<(), String> {
    let user = ctx
        .session
        .user()
        .map_err(|error| format!("failed to read session: {error}"))?
        .ok_or("not logged in")?;

    println!("{} <{}> - {}", user.name, user.email, user.role);

    if let Some(state) = &user.state {
        let district = user.district.as_deref().unwrap_or("-");
        println!("{district}, {state}");
    }

    Ok(())
}

async fn update(ctx: &AppContext, args: UpdateArgs) -> Result<(), String> {
    let profile = ctx
        .users
        .update_me(&ProfileUpdate {
            name: args.name,
            address: args.address,
            state: args.state,
            district: args.district,
            phone: args.phone,
        })
        .await
        .map_err(|error| console::api_failure(&ctx.session, &error))?;

    ctx.session
        .update_user(&profile)
        .map_err(|error| format!("failed to refresh session: {error}"))?;

    println!("profile updated");

    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String, String> {
    match password {
        Some(password) => Ok(password),
        None => console::read_line("password: ")
            .map_err(|error| format!("failed to read password: {error}")),
    }
}
