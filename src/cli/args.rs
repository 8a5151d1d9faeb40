use crate::services::config::implementations::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_CONSUMER_COUNT, DEFAULT_ITEMS_PER_PRODUCER,
    DEFAULT_PRODUCER_COUNT,
};
use crate::services::DefaultPipelineConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "bounded_pipeline")]
#[command(about = "Run producers and consumers over a bounded channel")]
#[command(version)]
pub struct Cli {
    /// Number of producer workers
    #[arg(short, long, env = "PIPELINE_PRODUCERS", default_value_t = DEFAULT_PRODUCER_COUNT)]
    pub producers: usize,

    /// Number of consumer workers
    #[arg(short, long, env = "PIPELINE_CONSUMERS", default_value_t = DEFAULT_CONSUMER_COUNT)]
    pub consumers: usize,

    /// Items generated by each producer
    #[arg(short = 'n', long, env = "PIPELINE_ITEMS", default_value_t = DEFAULT_ITEMS_PER_PRODUCER)]
    pub items_per_producer: usize,

    /// Channel capacity before producers have to wait
    #[arg(long, env = "PIPELINE_CAPACITY", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub capacity: usize,

    /// Simulated processing time per consumed item, in milliseconds
    #[arg(short, long, env = "PIPELINE_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// Runtime worker threads (defaults to the number of CPUs)
    #[arg(short = 't', long, env = "PIPELINE_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Suppress per-item output lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a JSON run summary to stderr when finished
    #[arg(long)]
    pub summary: bool,
}

impl Cli {
    /// Worker threads for the tokio runtime
    pub fn runtime_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl From<&Cli> for DefaultPipelineConfig {
    fn from(cli: &Cli) -> Self {
        DefaultPipelineConfig::new()
            .with_producers(cli.producers)
            .with_consumers(cli.consumers)
            .with_items_per_producer(cli.items_per_producer)
            .with_channel_capacity(cli.capacity)
            .with_processing_delay(Duration::from_millis(cli.delay_ms))
    }
}
