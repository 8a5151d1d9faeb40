// パイプラインのトレイト定義
// 差し替え可能な外部コラボレータのインターフェース

use super::error::EncodeError;
use super::types::Item;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// Producer数
    fn producer_count(&self) -> usize;

    /// Consumer数
    fn consumer_count(&self) -> usize;

    /// 1 Producerあたりの生成アイテム数
    fn items_per_producer(&self) -> usize;

    /// チャンネル容量
    fn channel_capacity(&self) -> usize;

    /// 1アイテムあたりの擬似処理時間
    fn processing_delay(&self) -> Duration;
}

impl PipelineConfig for Box<dyn PipelineConfig> {
    fn producer_count(&self) -> usize {
        self.as_ref().producer_count()
    }

    fn consumer_count(&self) -> usize {
        self.as_ref().consumer_count()
    }

    fn items_per_producer(&self) -> usize {
        self.as_ref().items_per_producer()
    }

    fn channel_capacity(&self) -> usize {
        self.as_ref().channel_capacity()
    }

    fn processing_delay(&self) -> Duration {
        self.as_ref().processing_delay()
    }
}

/// アイテムを報告用の文字列表現に変換する
#[automock]
pub trait ItemEncoder: Send + Sync {
    fn encode(&self, item: &Item) -> Result<String, EncodeError>;
}

/// 消費結果の出力先
#[automock]
#[async_trait]
pub trait ConsumptionReporter: Send + Sync {
    /// 1アイテム消費時の報告
    async fn report_consumed(&self, sequence: i32, encoded: &str, consumer_id: usize);

    /// エンコード失敗の報告
    async fn report_encoding_failure(&self, sequence: i32, consumer_id: usize, error: &str);
}

#[async_trait]
impl ConsumptionReporter for Box<dyn ConsumptionReporter> {
    async fn report_consumed(&self, sequence: i32, encoded: &str, consumer_id: usize) {
        self.as_ref()
            .report_consumed(sequence, encoded, consumer_id)
            .await
    }

    async fn report_encoding_failure(&self, sequence: i32, consumer_id: usize, error: &str) {
        self.as_ref()
            .report_encoding_failure(sequence, consumer_id, error)
            .await
    }
}
