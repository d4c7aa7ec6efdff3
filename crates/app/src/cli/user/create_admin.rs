use std::sync::Arc;

use clap::Args;
use portal::roles::{Role, UserStatus};
use portal_app::{
    auth::{LocalAuthenticator, NewAccount},
    database,
    domain::users::PgUsersService,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Login name
    #[arg(long)]
    username: String,

    /// Email address used to sign in
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long)]
    password: String,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let authenticator = LocalAuthenticator::new(Arc::new(PgUsersService::new(pool)));

    let user = authenticator
        .create_account(NewAccount {
            username: args.username,
            email: args.email,
            password: args.password,
            first_name: args.first_name,
            last_name: args.last_name,
            company: None,
            phone: None,
            role: Role::Admin,
            status: UserStatus::Active,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("email: {}", user.email);

    Ok(())
}
