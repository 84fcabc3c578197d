use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod fake;

/// 种子通知数据结构，只在一次 POST 请求中存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSeed {
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub order_id: i32,
}

/// 服务端存储的通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub order_id: i32,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 通知列表查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl NotificationQuery {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// API 响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

/// 未读数量推送事件，来自 count-watch 事件流
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEvent {
    pub message: String,
    pub count: u64,
}

/// 不带数据的 API 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
