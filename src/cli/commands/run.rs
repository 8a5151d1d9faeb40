use crate::cli::Cli;
use crate::core::RunSummary;
use crate::engine::run_to_console;
use crate::services::DefaultPipelineConfig;
use anyhow::{Context, Result};

/// Execute the pipeline with the parsed command line options
pub async fn execute_run(cli: &Cli) -> Result<RunSummary> {
    let config = DefaultPipelineConfig::from(cli);

    let summary = run_to_console(&config, cli.quiet)
        .await
        .context("pipeline run failed")?;

    if cli.summary {
        let rendered =
            serde_json::to_string_pretty(&summary).context("failed to render run summary")?;
        eprintln!("{rendered}");
    }

    Ok(summary)
}
