// 設定管理の具象実装

use crate::core::PipelineConfig;
use std::time::Duration;

pub const DEFAULT_PRODUCER_COUNT: usize = 3;
pub const DEFAULT_CONSUMER_COUNT: usize = 6;
pub const DEFAULT_ITEMS_PER_PRODUCER: usize = 20;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 10;
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(1);

/// デフォルト設定実装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPipelineConfig {
    producers: usize,
    consumers: usize,
    items_per_producer: usize,
    channel_capacity: usize,
    processing_delay: Duration,
}

impl DefaultPipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_producers(mut self, producers: usize) -> Self {
        self.producers = producers;
        self
    }

    pub fn with_consumers(mut self, consumers: usize) -> Self {
        self.consumers = consumers;
        self
    }

    pub fn with_items_per_producer(mut self, items_per_producer: usize) -> Self {
        self.items_per_producer = items_per_producer;
        self
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_processing_delay(mut self, processing_delay: Duration) -> Self {
        self.processing_delay = processing_delay;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            producers: DEFAULT_PRODUCER_COUNT,
            consumers: DEFAULT_CONSUMER_COUNT,
            items_per_producer: DEFAULT_ITEMS_PER_PRODUCER,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn producer_count(&self) -> usize {
        self.producers
    }

    fn consumer_count(&self) -> usize {
        self.consumers
    }

    fn items_per_producer(&self) -> usize {
        self.items_per_producer
    }

    fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    fn processing_delay(&self) -> Duration {
        self.processing_delay
    }
}
