use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;

use crate::config::{Monitoring, Retry};

use super::error::DirectoryError;
use super::model::{
    DeleteAlarmsRequest, DescribeAlarmsRequest, DescribeAlarmsResponse, PutAlarmRequest,
    RemoteAlarm,
};
use super::AlarmDirectory;

pub(super) struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

/// Follow continuation tokens until the listing is exhausted. Callers get
/// one flat sequence in arrival order and never see the tokens.
pub(super) async fn drain_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, DirectoryError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, DirectoryError>>,
{
    let mut items = Vec::new();
    let mut token = None;

    loop {
        let page = fetch_page(token.take()).await?;
        items.extend(page.items);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(items)
}

/// Bounded retry with exponential backoff for transient remote failures.
pub(super) async fn with_retry<T, F, Fut>(
    op: &str,
    policy: &Retry,
    mut call: F,
) -> Result<T, DirectoryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DirectoryError>>,
{
    let mut attempt: u32 = 1;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < policy.max_attempts => {
                let shift = (attempt - 1).min(16);
                let delay_ms = policy.base_delay_ms.saturating_mul(1u64 << shift);
                log::warn!(
                    "remote_call_retry op={} attempt={} delay_ms={} error={}",
                    op,
                    attempt,
                    delay_ms,
                    error
                );
                sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Directory client against a CloudWatch-style JSON control plane.
pub struct HttpAlarmDirectory {
    client: Client,
    base_url: String,
    api_key: String,
    page_size: u32,
    retry: Retry,
}

impl HttpAlarmDirectory {
    pub fn new(monitoring: &Monitoring, retry: Retry) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(monitoring.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: monitoring.base_url.trim_end_matches('/').to_string(),
            api_key: monitoring.api_key.clone(),
            page_size: monitoring.page_size,
            retry,
        })
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, DirectoryError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("directory_request url={}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(DirectoryError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn post_empty<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        missing_ok: bool,
    ) -> Result<(), DirectoryError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("directory_request url={}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success()
            || status == StatusCode::NO_CONTENT
            || (missing_ok && status == StatusCode::NOT_FOUND)
        {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(DirectoryError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn describe_page(
        &self,
        prefix: &str,
        next_token: Option<String>,
    ) -> Result<Page<RemoteAlarm>, DirectoryError> {
        let body = DescribeAlarmsRequest {
            alarm_name_prefix: prefix,
            max_records: self.page_size,
            next_token,
        };

        let response: DescribeAlarmsResponse =
            with_retry("describe_alarms", &self.retry, || {
                self.post_json("/alarms/describe", &body)
            })
            .await?;

        Ok(Page {
            items: response.metric_alarms,
            next_token: response.next_token,
        })
    }
}

impl AlarmDirectory for HttpAlarmDirectory {
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<RemoteAlarm>, DirectoryError> {
        drain_pages(|token| self.describe_page(prefix, token)).await
    }

    async fn delete_batch(&self, names: &[String]) -> Result<(), DirectoryError> {
        // Not retried: delete failures are swallowed upstream anyway.
        self.post_empty("/alarms/delete", &DeleteAlarmsRequest { alarm_names: names }, true)
            .await
    }

    async fn create_one(&self, request: &PutAlarmRequest) -> Result<(), DirectoryError> {
        with_retry("put_alarm", &self.retry, || {
            self.post_empty("/alarms/put", request, false)
        })
        .await
    }
}
