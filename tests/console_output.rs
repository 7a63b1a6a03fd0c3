use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use molenker_watcher::{Poller, RawResponse, ScanTransport, Sleeper, WatcherConfig, WatcherError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 记录所有日志行，供断言使用
struct CaptureLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("molenker_watcher") {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

struct ScriptedTransport {
    responses: Mutex<VecDeque<molenker_watcher::Result<RawResponse>>>,
    done: Arc<AtomicBool>,
}

#[async_trait]
impl ScanTransport for ScriptedTransport {
    async fn fetch(&self, _url: &str) -> molenker_watcher::Result<RawResponse> {
        let mut responses = self.responses.lock().unwrap();
        let next = responses.pop_front().unwrap_or_else(|| Ok(RawResponse::new(200, "{}")));
        if responses.is_empty() {
            self.done.store(true, Ordering::SeqCst);
        }
        next
    }
}

struct InstantSleeper;

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn run_writes_one_line_per_outcome_in_order() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let done = Arc::new(AtomicBool::new(false));
    let transport = ScriptedTransport {
        responses: Mutex::new(VecDeque::from(vec![
            Err(WatcherError::Network("connection refused".into())),
            Ok(RawResponse::new(500, "Internal Error".repeat(20))),
            Ok(RawResponse::new(
                200,
                r#"{"scanned_posts":7,"new_launches":2,"details":[{"name":"Foo","symbol":"FOO"},{"name":"Bar","symbol":"BAR"}]}"#,
            )),
        ])),
        done: Arc::clone(&done),
    };
    let config = WatcherConfig::new(Some("http://example.com/scan".into())).unwrap();
    let poller = Poller::new(config, transport, InstantSleeper);

    poller
        .run(async move {
            while !done.load(Ordering::SeqCst) {
                tokio::task::yield_now().await;
            }
        })
        .await;

    let lines = LOGGER.lines.lock().unwrap().clone();
    let messages: Vec<&str> = lines.iter().map(|(_, m)| m.as_str()).collect();
    let truncated = format!("Response: {}", &"Internal Error".repeat(20)[..200]);
    assert_eq!(
        messages,
        vec![
            "Molenker Watcher Started",
            "Target: http://example.com/scan",
            "Interval: 60s",
            "Triggering scan at http://example.com/scan...",
            "Connection Failed: connection refused",
            "Triggering scan at http://example.com/scan...",
            "Error: Server returned 500",
            truncated.as_str(),
            "Triggering scan at http://example.com/scan...",
            "Success! Scanned 7 posts, Found 2 new launches.",
            " -> New Token: Foo (FOO)",
            " -> New Token: Bar (BAR)",
            "Stopping watcher...",
        ]
    );
    assert_eq!(lines[4].0, Level::Error);
}
