// パイプラインのデータ構造定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// ペイロードIDの乱数範囲
pub const PAYLOAD_RANGE: Range<i32> = 0..100;

/// Producerが生成し、Consumerが処理するデータレコード
///
/// 生成時に全フィールドが確定し、以後変更されない。
/// `id`は一意な識別子ではなく、意味を持たないペイロード値。
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Id")]
    id: i32,
    #[serde(rename = "Timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(rename = "ProducerId")]
    producer_id: usize,
}

impl Item {
    /// 現在時刻を刻印してアイテムを生成
    pub fn create(payload_id: i32, producer_id: usize) -> Self {
        Self {
            id: payload_id,
            timestamp: Utc::now(),
            producer_id,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn producer_id(&self) -> usize {
        self.producer_id
    }
}

/// Consumerが出力する1行を組み立てる
pub fn format_report_line(sequence: i32, encoded: &str, consumer_id: usize) -> String {
    format!("element {sequence} is: {encoded}, consumed by {consumer_id}")
}

/// 報告された1件分の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedRecord {
    pub sequence: i32,
    pub encoded: String,
    pub consumer_id: usize,
}

impl ConsumedRecord {
    pub fn line(&self) -> String {
        format_report_line(self.sequence, &self.encoded, self.consumer_id)
    }
}

/// エンコード失敗の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingFailureRecord {
    pub sequence: i32,
    pub consumer_id: usize,
    pub error: String,
}

/// チャンネルのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelState {
    /// 初期状態。pushを受け付ける
    OpenAccepting,
    /// クローズ済みだがバッファに残りがある
    ClosedDraining,
    /// クローズ済みかつ空。popは終端を返す
    ClosedEmpty,
}

/// チャンネルの計測値スナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub capacity: usize,
    pub pushed: u64,
    pub popped: u64,
    /// 満杯のため待機したpushの回数
    pub suspended_pushes: u64,
    /// 観測された最大占有数
    pub peak_occupancy: usize,
}

/// 1つのConsumerの処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConsumerOutcome {
    pub consumer_id: usize,
    pub consumed: usize,
    pub encoding_failures: usize,
}

/// パイプライン実行のサマリー
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub produced: usize,
    pub consumed: usize,
    pub encoding_failures: usize,
    /// 実行終了時のシーケンスカウンタ値
    pub final_sequence: i32,
    pub consumers: Vec<ConsumerOutcome>,
    pub channel: ChannelStats,
    pub total_processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_create_populates_all_fields() {
        let before = Utc::now();
        let item = Item::create(42, 3);
        let after = Utc::now();

        assert_eq!(item.id(), 42);
        assert_eq!(item.producer_id(), 3);
        assert!(item.timestamp() >= before && item.timestamp() <= after);
    }

    #[test]
    fn test_item_json_field_names() {
        let item = Item::create(7, 1);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["Id"], 7);
        assert_eq!(value["ProducerId"], 1);
        assert!(value["Timestamp"].is_string());
    }

    #[test]
    fn test_item_json_round_trip() {
        let item = Item::create(99, 2);
        let encoded = serde_json::to_string(&item).unwrap();
        let decoded: Item = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, item);
    }

    #[test]
    fn test_report_line_format() {
        let line = format_report_line(5, r#"{"Id":1}"#, 4);
        assert_eq!(line, r#"element 5 is: {"Id":1}, consumed by 4"#);

        let record = ConsumedRecord {
            sequence: 5,
            encoded: r#"{"Id":1}"#.to_string(),
            consumer_id: 4,
        };
        assert_eq!(record.line(), line);
    }
}
