use clap::Args;
use jiff::Timestamp;
use portal_app::{
    database,
    domain::{
        subscriptions::{PgSubscriptionsService, SubscriptionsService, data::NewSubscription},
        users::records::UserId,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateSubscriptionArgs {
    /// Owning user id
    #[arg(long)]
    user_id: i64,

    /// Product or service name
    #[arg(long)]
    name: String,

    /// Free-form status, e.g. `active`
    #[arg(long)]
    status: String,

    #[arg(long)]
    description: Option<String>,

    /// Renewal instant, RFC 3339 (e.g. `2027-01-01T00:00:00Z`)
    #[arg(long)]
    renewal_date: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateSubscriptionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgSubscriptionsService::new(pool);

    let subscription = service
        .create_subscription(NewSubscription {
            user_id: UserId::from_i64(args.user_id),
            name: args.name,
            description: args.description,
            status: args.status,
            renewal_date: args.renewal_date,
        })
        .await
        .map_err(|error| format!("failed to create subscription: {error}"))?;

    println!("subscription_id: {}", subscription.id);
    println!("name: {}", subscription.name);

    Ok(())
}
