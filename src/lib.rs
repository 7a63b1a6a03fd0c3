pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod poller;
pub mod types;

pub use api::{RawResponse, ScanClient, ScanTransport};
pub use config::WatcherConfig;
pub use error::{Result, WatcherError};
pub use poller::{report, Poller, ReportLine, Sleeper, TickOutcome, TokioSleeper};
pub use types::{ScanFailure, ScanResult, TokenRecord};
