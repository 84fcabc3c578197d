use anyhow::Result;
use clap::Subcommand;
use seeder_client::format_notification;
use seeder_sdk::{NotificationQuery, NotifyClient};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List notifications, newest first
    List {
        /// Only show notifications for this user
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// Show a single notification
    Get {
        /// Notification ID
        id: Uuid,
    },
    /// Mark a notification as read
    Read {
        /// Notification ID
        id: Uuid,
    },
    /// Count unread notifications for a user
    Count {
        /// User ID
        user_id: Uuid,
    },
    /// Follow the unread count for a user as it changes
    Watch {
        /// User ID
        user_id: Uuid,
    },
    /// Server health check
    Health,
}

pub async fn handle_notification_command(
    client: &NotifyClient,
    action: NotificationAction,
) -> Result<()> {
    match action {
        NotificationAction::List { user_id } => {
            let query = NotificationQuery { user_id };
            match client.get_notifications(&query).await {
                Ok(notifications) => {
                    println!("📬 Notifications ({} total):", notifications.len());
                    for (i, notification) in notifications.iter().enumerate() {
                        println!("  {}. {}", i + 1, format_notification(notification));
                    }
                }
                Err(e) => {
                    eprintln!("❌ Failed to get notifications: {}", e);
                    std::process::exit(1);
                }
            }
        }
        NotificationAction::Get { id } => match client.get_notification(id).await {
            Ok(notification) => println!("{}", format_notification(&notification)),
            Err(e) => {
                eprintln!("❌ Failed to get notification {}: {}", id, e);
                std::process::exit(1);
            }
        },
        NotificationAction::Read { id } => match client.read_notification(id).await {
            Ok(message) => println!("✅ {}", message),
            Err(e) => {
                eprintln!("❌ Failed to read notification {}: {}", id, e);
                std::process::exit(1);
            }
        },
        NotificationAction::Count { user_id } => match client.count_unread(user_id).await {
            Ok(count) => println!("🔔 {} unread notification(s) for {}", count, user_id),
            Err(e) => {
                eprintln!("❌ Failed to count notifications: {}", e);
                std::process::exit(1);
            }
        },
        NotificationAction::Watch { user_id } => {
            println!("🎧 Watching unread count for {}...", user_id);
            println!("   Press Ctrl+C to stop");

            let mut rx = match client.watch_count(user_id).await {
                Ok(rx) => rx,
                Err(e) => {
                    eprintln!("❌ Failed to watch notifications: {}", e);
                    std::process::exit(1);
                }
            };
            while let Some(event) = rx.recv().await {
                match event {
                    Ok(event) => println!("🔔 {} unread ({})", event.count, event.message),
                    Err(e) => {
                        eprintln!("❌ Count stream failed: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            println!("🔌 Stream closed");
        }
        NotificationAction::Health => match client.health().await {
            Ok(message) => println!("✅ Server is healthy: {}", message),
            Err(e) => {
                eprintln!("❌ Server health check failed: {}", e);
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
