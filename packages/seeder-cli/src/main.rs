use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use seeder_client::{DEFAULT_SEED_COUNT, SeedPlan, seed, seed_outcome_line};
use seeder_sdk::NotifyClient;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod notification_commands;

#[derive(Parser)]
#[command(name = "seeder")]
#[command(about = "Seed and inspect a notification server")]
struct Cli {
    /// Server base URL [env: SEEDER_SERVER_URL, default: http://127.0.0.1:8000]
    #[arg(short, long)]
    server: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send fake notifications to the server, all at once
    #[command(alias = "fake")]
    Seed {
        /// Number of notifications
        #[arg(short = 'n', long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
        /// Cap on requests in flight (default: no cap)
        #[arg(long)]
        concurrency: Option<NonZeroUsize>,
    },
    #[command(flatten)]
    Notification(notification_commands::NotificationAction),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let server = config::server_from_env(cli.server)?;
    info!(%server, "using notification server");
    let client = NotifyClient::new(&server).with_timeout(Duration::from_secs(cli.timeout));

    match cli.command {
        Commands::Seed { count, concurrency } => {
            let plan = SeedPlan { count, concurrency };
            let outcome = seed(Arc::new(client), &plan).await;
            // a failed seed is reported, not turned into a failing exit status
            println!("{}", seed_outcome_line(&outcome));
        }
        Commands::Notification(action) => {
            notification_commands::handle_notification_command(&client, action).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification_commands::NotificationAction;
    use clap::Parser;

    #[test]
    fn test_seed_defaults() {
        let cli = Cli::try_parse_from(["seeder", "seed"]).unwrap();

        assert_eq!(cli.server, None);
        assert_eq!(cli.timeout, 30);
        match cli.command {
            Commands::Seed { count, concurrency } => {
                assert_eq!(count, 100);
                assert_eq!(concurrency, None);
            }
            _ => panic!("Expected Seed command"),
        }
    }

    #[test]
    fn test_seed_with_options() {
        let args = [
            "seeder",
            "--server",
            "http://localhost:9000",
            "seed",
            "-n",
            "250",
            "--concurrency",
            "8",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Commands::Seed { count, concurrency } => {
                assert_eq!(count, 250);
                assert_eq!(concurrency.map(NonZeroUsize::get), Some(8));
            }
            _ => panic!("Expected Seed command"),
        }
    }

    #[test]
    fn test_fake_alias() {
        let cli = Cli::try_parse_from(["seeder", "fake", "--count", "5"]).unwrap();
        match cli.command {
            Commands::Seed { count, .. } => assert_eq!(count, 5),
            _ => panic!("Expected Seed command"),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = Cli::try_parse_from(["seeder", "seed", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["seeder", "--timeout", "0", "seed"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["seeder", "--timeout", "1", "seed"]).unwrap();
        assert_eq!(cli.timeout, 1);
    }

    #[test]
    fn test_watch_command() {
        let args = ["seeder", "watch", "6f1c2a7e-8a1d-4b4e-9a53-0c6c3e2f9d10"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Notification(NotificationAction::Watch { user_id }) => {
                assert_eq!(user_id.to_string(), "6f1c2a7e-8a1d-4b4e-9a53-0c6c3e2f9d10");
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_list_with_user_filter() {
        let args = [
            "seeder",
            "list",
            "--user-id",
            "6f1c2a7e-8a1d-4b4e-9a53-0c6c3e2f9d10",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Notification(NotificationAction::List { user_id }) => {
                assert_eq!(
                    user_id.unwrap().to_string(),
                    "6f1c2a7e-8a1d-4b4e-9a53-0c6c3e2f9d10"
                );
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_invalid_uuid_rejected() {
        let result = Cli::try_parse_from(["seeder", "get", "not-a-uuid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_all_commands_exist() {
        let id = "0b6f5d1e-3c0a-4f6e-8d2b-7a1e9c4f2b3d";
        let commands = vec![
            vec!["seeder", "seed"],
            vec!["seeder", "list"],
            vec!["seeder", "get", id],
            vec!["seeder", "read", id],
            vec!["seeder", "count", id],
            vec!["seeder", "watch", id],
            vec!["seeder", "health"],
        ];

        for args in commands {
            let result = Cli::try_parse_from(args.clone());
            assert!(result.is_ok(), "Failed to parse: {:?}", args);
        }
    }
}
