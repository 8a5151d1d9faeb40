use anyhow::Result;
use bounded_pipeline::{
    cli::{execute_run, Cli},
    services::{init_logging, DEFAULT_LOG_FILTER},
};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(DEFAULT_LOG_FILTER)?;

    // ワーカーを並列に動かすためマルチスレッドランタイムを明示的に構築
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cli.runtime_threads())
        .enable_all()
        .build()?;

    let summary = runtime.block_on(execute_run(&cli))?;
    tracing::debug!(consumed = summary.consumed, "exiting");

    Ok(())
}
