pub mod seed;

pub use seed::{
    DEFAULT_SEED_COUNT, NotificationSink, SeedError, SeedPlan, SeedReport, dispatch, generate,
    seed,
};

use chrono::Local;
use seeder_sdk::Notification;

pub const SEED_SUCCESS: &str = "SUCCESS SEED";

/// 播种结束后输出的唯一一行
pub fn seed_outcome_line(outcome: &Result<SeedReport, SeedError>) -> String {
    match outcome {
        Ok(_) => SEED_SUCCESS.to_string(),
        Err(err) => format!("❌ Failed to seed notifications: {}", err),
    }
}

/// 格式化通知显示
pub fn format_notification(notification: &Notification) -> String {
    format!(
        "{} {} (order {}, user {})\n{}\nCreated: {}",
        if notification.is_read { "📭" } else { "📬" },
        notification.title,
        notification.order_id,
        notification.user_id,
        notification.content,
        notification
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    )
}
