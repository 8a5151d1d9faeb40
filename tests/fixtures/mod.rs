// テストユーティリティ
// 各統合テストで共有する設定とヘルパー

#![allow(dead_code)]

use bounded_pipeline::{
    core::{ConsumedRecord, Item, RunSummary},
    services::{DefaultPipelineConfig, JsonItemEncoder, MemoryReporter},
    Pipeline,
};
use std::sync::Arc;
use std::time::Duration;

/// 実行が終わらない場合に失敗させる上限
pub const RUN_TIMEOUT: Duration = Duration::from_secs(30);

/// 処理時間を指定したテスト用設定
pub fn test_config(
    producers: usize,
    consumers: usize,
    items_per_producer: usize,
    capacity: usize,
    delay_ms: u64,
) -> DefaultPipelineConfig {
    DefaultPipelineConfig::new()
        .with_producers(producers)
        .with_consumers(consumers)
        .with_items_per_producer(items_per_producer)
        .with_channel_capacity(capacity)
        .with_processing_delay(Duration::from_millis(delay_ms))
}

/// 全出力を記録しながらパイプラインを実行
pub async fn run_recorded(config: &DefaultPipelineConfig) -> (RunSummary, Arc<MemoryReporter>) {
    let reporter = Arc::new(MemoryReporter::new());
    let pipeline = Pipeline::new(Arc::new(JsonItemEncoder::new()), Arc::clone(&reporter));

    let summary = tokio::time::timeout(RUN_TIMEOUT, pipeline.execute(config))
        .await
        .expect("pipeline did not terminate")
        .expect("pipeline failed");

    (summary, reporter)
}

/// 出力されたJSONをアイテムに戻す
pub fn decode(record: &ConsumedRecord) -> Item {
    serde_json::from_str(&record.encoded).expect("reported item is not valid JSON")
}
