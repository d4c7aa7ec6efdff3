use clap::{Parser, Subcommand};

mod subscription;
mod user;

#[derive(Debug, Parser)]
#[command(name = "portal-app", about = "Portal administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Subscription(subscription::SubscriptionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Subscription(command) => subscription::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_admin() {
        let cli = Cli::try_parse_from([
            "portal-app",
            "user",
            "create-admin",
            "--username",
            "root",
            "--email",
            "root@example.com",
            "--password",
            "correct horse",
            "--database-url",
            "postgres://localhost/portal",
        ]);

        assert!(cli.is_ok(), "create-admin should parse: {cli:?}");
    }

    #[test]
    fn subscription_create_requires_a_user() {
        let cli = Cli::try_parse_from([
            "portal-app",
            "subscription",
            "create",
            "--name",
            "Office Suite",
            "--status",
            "active",
            "--database-url",
            "postgres://localhost/portal",
        ]);

        assert!(cli.is_err(), "--user-id is required");
    }
}
