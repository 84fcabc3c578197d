use crate::SdkResult;
use crate::error::*;
use crate::sse::EventDecoder;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use seeder_core::*;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotifyClient {
    client: Client,
    pub base_url: String,
    pub timeout: Duration,
}

impl NotifyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> SdkResult<Url> {
        let url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;
        Ok(url)
    }

    async fn api_request<T>(&self, request: RequestBuilder) -> SdkResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request.timeout(self.timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SdkError::ApiError { status });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 提交一条通知
    ///
    /// Only transport failures are errors here; whatever status the server
    /// answers with is handed back to the caller untouched.
    pub async fn create_notification(&self, seed: &NotificationSeed) -> SdkResult<StatusCode> {
        let url = self.endpoint("notification")?;
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(seed)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, order_id = seed.order_id, "notification submitted");
        Ok(status)
    }

    /// 获取通知列表，按创建时间倒序
    pub async fn get_notifications(
        &self,
        query: &NotificationQuery,
    ) -> SdkResult<Vec<Notification>> {
        let url = self.endpoint("notification")?;
        let response: ApiResponse<Option<Vec<Notification>>> =
            self.api_request(self.client.get(url).query(query)).await?;
        // an empty table comes back as `null`
        Ok(response.data.unwrap_or_default())
    }

    pub async fn get_notification(&self, id: Uuid) -> SdkResult<Notification> {
        let url = self.endpoint(&format!("notification/{id}"))?;
        let response: ApiResponse<Notification> = self.api_request(self.client.get(url)).await?;
        Ok(response.data)
    }

    /// 标记通知为已读
    pub async fn read_notification(&self, id: Uuid) -> SdkResult<String> {
        let url = self.endpoint(&format!("notification/{id}"))?;
        let response: ApiMessage = self.api_request(self.client.put(url)).await?;
        Ok(response.message)
    }

    /// 获取用户未读通知数量
    pub async fn count_unread(&self, user_id: Uuid) -> SdkResult<u64> {
        let url = self.endpoint(&format!("notification/count/{user_id}"))?;
        let response: ApiResponse<Option<u64>> = self.api_request(self.client.get(url)).await?;
        Ok(response.data.unwrap_or(0))
    }

    /// 订阅用户未读数量变化
    ///
    /// The stream stays open, so no request timeout applies. The receiver
    /// closes when the server ends the stream; a broken stream or an
    /// undecodable frame is delivered as one last `Err`.
    pub async fn watch_count(
        &self,
        user_id: Uuid,
    ) -> SdkResult<mpsc::UnboundedReceiver<SdkResult<CountEvent>>> {
        let url = self.endpoint(&format!("notification/count-watch/{user_id}"))?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SdkError::ApiError { status });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mut stream = response.bytes_stream();
        tokio::spawn(async move {
            let mut decoder = EventDecoder::default();
            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        warn!(error = %e, "count stream broke");
                        let _ = tx.send(Err(SdkError::from(e)));
                        return;
                    }
                };
                for event in decoder.feed(&chunk) {
                    let failed = event.is_err();
                    if tx.send(event).is_err() || failed {
                        return;
                    }
                }
            }
            debug!(%user_id, "count stream closed by server");
        });

        Ok(rx)
    }

    pub async fn health(&self) -> SdkResult<String> {
        let url = self.endpoint("healthz")?;
        let response: ApiMessage = self.api_request(self.client.get(url)).await?;
        Ok(response.message)
    }
}
