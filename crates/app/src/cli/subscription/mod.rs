use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct SubscriptionCommand {
    #[command(subcommand)]
    command: SubscriptionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SubscriptionSubcommand {
    Create(create::CreateSubscriptionArgs),
}

pub(crate) async fn run(command: SubscriptionCommand) -> Result<(), String> {
    match command.command {
        SubscriptionSubcommand::Create(args) => create::run(args).await,
    }
}
