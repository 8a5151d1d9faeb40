// 消費結果報告の具象実装

use crate::core::{
    format_report_line, ConsumedRecord, ConsumptionReporter, EncodingFailureRecord,
};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// コンソール出力による報告実装
///
/// `println!`は標準出力をロックするため、行単位でインターリーブされる。
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ConsumptionReporter for ConsoleReporter {
    async fn report_consumed(&self, sequence: i32, encoded: &str, consumer_id: usize) {
        if !self.quiet {
            println!("{}", format_report_line(sequence, encoded, consumer_id));
        }
    }

    async fn report_encoding_failure(&self, sequence: i32, consumer_id: usize, error: &str) {
        if !self.quiet {
            println!("error formatting element {sequence} (consumer {consumer_id}): {error}");
        }
    }
}

/// 何もしない報告実装（ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConsumptionReporter for NoOpReporter {
    async fn report_consumed(&self, _sequence: i32, _encoded: &str, _consumer_id: usize) {
        // 何もしない
    }

    async fn report_encoding_failure(&self, _sequence: i32, _consumer_id: usize, _error: &str) {
        // 何もしない
    }
}

/// メモリ内に全報告を記録する実装（テスト・検証用）
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<ConsumedRecord>>,
    failures: Mutex<Vec<EncodingFailureRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 報告順の消費記録
    pub fn records(&self) -> Vec<ConsumedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 報告順のエンコード失敗記録
    pub fn failures(&self) -> Vec<EncodingFailureRecord> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ConsumptionReporter for MemoryReporter {
    async fn report_consumed(&self, sequence: i32, encoded: &str, consumer_id: usize) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ConsumedRecord {
                sequence,
                encoded: encoded.to_string(),
                consumer_id,
            });
    }

    async fn report_encoding_failure(&self, sequence: i32, consumer_id: usize, error: &str) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EncodingFailureRecord {
                sequence,
                consumer_id,
                error: error.to_string(),
            });
    }
}
