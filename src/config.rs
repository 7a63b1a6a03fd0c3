use crate::error::{Result, WatcherError};
use reqwest::Url;
use std::time::Duration;

/// 未指定 URL 时使用的扫描接口
pub const DEFAULT_SCAN_URL: &str = "http://localhost:3000/api/cron/scan";

/// 两次 tick 之间的间隔
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// 启动时构建一次、之后不再修改的配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub url: String,
    pub interval: Duration,
}

impl WatcherConfig {
    /// 使用命令行覆盖的 URL（如有），否则使用默认地址
    pub fn new(url_override: Option<String>) -> Result<Self> {
        let url = match url_override {
            Some(url) => {
                Url::parse(&url)
                    .map_err(|e| WatcherError::Config(format!("invalid URL `{}`: {}", url, e)))?;
                url
            }
            None => DEFAULT_SCAN_URL.to_string(),
        };

        Ok(Self {
            url,
            interval: POLL_INTERVAL,
        })
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SCAN_URL.to_string(),
            interval: POLL_INTERVAL,
        }
    }
}
