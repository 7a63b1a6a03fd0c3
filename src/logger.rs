use chrono::{DateTime, Local, TimeZone};
use env_logger::{Builder, Env, Target};
use std::io::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 格式化时间戳 `YYYY-MM-DD HH:MM:SS`
pub fn timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `[timestamp] message`
pub fn format_line(timestamp: &str, message: &str) -> String {
    format!("[{}] {}", timestamp, message)
}

/// 初始化日志：输出到 stdout，默认级别 info，可用 RUST_LOG 覆盖
pub fn init() {
    let _ = builder().try_init();
}

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout).format(|buf, record| {
        let line = format_line(&timestamp(&Local::now()), &record.args().to_string());
        writeln!(buf, "{}", line)
    });
    builder
}
