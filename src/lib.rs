//! 容量制限付きチャンネルによるProducer/Consumerパイプライン
//!
//! 複数のProducerがタイムスタンプ付きアイテムを生成し、複数のConsumerが
//! 共有チャンネルから取り出して処理する。全Producer完了後にチャンネルを
//! クローズし、Consumerは残りを処理し切ってから終了する。

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    ChannelState, ChannelStats, ConsumptionReporter, Item, ItemEncoder, PipelineConfig,
    PipelineError, PipelineResult, RunSummary, SequenceCounter,
};
pub use engine::Pipeline;
