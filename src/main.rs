use anyhow::Result;
use clap::Parser;
use log::error;
use molenker_watcher::{logger, Poller, ScanClient, TokioSleeper, WatcherConfig};

#[derive(Parser)]
#[command(name = "molenker_watcher")]
#[command(about = "Periodically triggers the Molenker scan endpoint")]
#[command(version)]
struct Cli {
    /// Scan endpoint to call instead of the local default
    url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    let cli = Cli::parse();
    let config = WatcherConfig::new(cli.url)?;

    // 创建 API 客户端
    let client = ScanClient::new()?;

    let poller = Poller::new(config, client, TokioSleeper);
    poller.run(shutdown_signal()).await;

    Ok(())
}

/// 等待 Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
