use crate::api::ScanTransport;
use crate::config::WatcherConfig;
use crate::error::WatcherError;
use crate::types::{ScanFailure, ScanResult};
use async_trait::async_trait;
use log::{debug, info, log, Level};
use std::future::Future;
use std::time::Duration;

/// 非 200 响应体最多记录的字符数
pub const BODY_PREVIEW_CHARS: usize = 200;

/// 两次 tick 之间的等待，测试中可替换为假时钟
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 单次 tick 的结果
#[derive(Debug)]
pub enum TickOutcome {
    Success(ScanResult),
    StatusError { status: u16, body: String },
    ConnectionFailed(WatcherError),
    ParseFailed(WatcherError),
}

/// 待写入日志的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub level: Level,
    pub message: String,
}

impl ReportLine {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// 截取响应体前 `max_chars` 个字符
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

/// 把一次 tick 的结果转换成日志行
pub fn report(outcome: &TickOutcome) -> Vec<ReportLine> {
    let mut lines = Vec::new();

    match outcome {
        TickOutcome::Success(result) => {
            lines.push(ReportLine::new(
                Level::Info,
                format!(
                    "Success! Scanned {} posts, Found {} new launches.",
                    result.scanned_posts, result.new_launches
                ),
            ));
            if let Some(timestamp) = &result.timestamp {
                lines.push(ReportLine::new(
                    Level::Debug,
                    format!("Scan finished at {}", timestamp),
                ));
            }

            if result.new_launches > 0 {
                if let Some(kind) = &result.invalid_details {
                    lines.push(unexpected(&WatcherError::InvalidResponse(format!(
                        "`details` is {}, expected an array",
                        kind
                    ))));
                }
                for (index, token) in result.details.iter().enumerate() {
                    match token.labels(index) {
                        Ok((name, symbol)) => lines.push(ReportLine::new(
                            Level::Info,
                            format!(" -> New Token: {} ({})", name, symbol),
                        )),
                        Err(e) => {
                            lines.push(unexpected(&e));
                            break;
                        }
                    }
                }
            }
        }
        TickOutcome::StatusError { status, body } => {
            lines.push(ReportLine::new(
                Level::Error,
                format!("Error: Server returned {}", status),
            ));
            lines.push(ReportLine::new(
                Level::Error,
                format!("Response: {}", truncate_body(body, BODY_PREVIEW_CHARS)),
            ));
            if let Some(failure) = ScanFailure::from_body(body) {
                lines.push(ReportLine::new(
                    Level::Debug,
                    format!(
                        "Scan failure: {} ({})",
                        failure.error.as_deref().unwrap_or("unknown"),
                        failure.message.as_deref().unwrap_or("no message")
                    ),
                ));
            }
        }
        TickOutcome::ConnectionFailed(e) => {
            lines.push(ReportLine::new(
                Level::Error,
                format!("Connection Failed: {}", e),
            ));
        }
        TickOutcome::ParseFailed(e) => lines.push(unexpected(e)),
    }

    lines
}

fn unexpected(e: &WatcherError) -> ReportLine {
    ReportLine::new(Level::Error, format!("Unexpected Error: {}", e))
}

pub struct Poller<T, S> {
    config: WatcherConfig,
    transport: T,
    sleeper: S,
}

impl<T: ScanTransport, S: Sleeper> Poller<T, S> {
    pub fn new(config: WatcherConfig, transport: T, sleeper: S) -> Self {
        Self {
            config,
            transport,
            sleeper,
        }
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// 执行一次扫描请求并分类结果
    pub async fn tick(&self) -> TickOutcome {
        info!("Triggering scan at {}...", self.config.url);

        let response = match self.transport.fetch(&self.config.url).await {
            Ok(response) => response,
            Err(e) if e.is_network() => return TickOutcome::ConnectionFailed(e),
            Err(e) => return TickOutcome::ParseFailed(e),
        };

        if response.status != 200 {
            return TickOutcome::StatusError {
                status: response.status,
                body: response.body,
            };
        }

        match ScanResult::from_body(&response.body) {
            Ok(result) => {
                debug!("Scan response: {:?}", result);
                TickOutcome::Success(result)
            }
            Err(e) => TickOutcome::ParseFailed(e),
        }
    }

    /// 立即执行第一次 tick，之后按固定间隔循环，直到 `shutdown` 完成
    ///
    /// 请求进行中或等待期间都会响应 `shutdown`。
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!("Molenker Watcher Started");
        info!("Target: {}", self.config.url);
        info!("Interval: {}s", self.config.interval.as_secs());

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = self.tick_and_wait() => {}
            }
        }

        info!("Stopping watcher...");
    }

    async fn tick_and_wait(&self) {
        let outcome = self.tick().await;
        emit(&report(&outcome));
        self.sleeper.sleep(self.config.interval).await;
    }
}

fn emit(lines: &[ReportLine]) {
    for line in lines {
        log!(line.level, "{}", line.message);
    }
}
