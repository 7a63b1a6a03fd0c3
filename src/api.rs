use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// 单次请求的超时时间
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 原始 HTTP 响应：状态码和完整响应体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// 对扫描接口发起 GET 请求
///
/// 任何状态码都算请求成功，只有传输层失败才返回错误。
#[async_trait]
pub trait ScanTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawResponse>;
}

pub struct ScanClient {
    client: Client,
}

impl ScanClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ScanTransport for ScanClient {
    async fn fetch(&self, url: &str) -> Result<RawResponse> {
        debug!("Requesting scan endpoint: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Scan endpoint returned [{}], {} bytes", status, body.len());

        Ok(RawResponse { status, body })
    }
}
