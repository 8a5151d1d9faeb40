// Pipeline - Producer-Consumer パイプライン
// チャンネル生成からシャットダウンまでのオーケストレーション

use super::{channel::bounded, consumer::spawn_consumers, producer::spawn_producers};
use crate::core::{
    ChannelState, ConsumerOutcome, ConsumptionReporter, Item, ItemEncoder, PipelineConfig,
    PipelineError, PipelineResult, RunSummary, SequenceCounter,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Coordinator: Producer/Consumerの起動、クローズ、完了待機を担う
pub struct Pipeline<E: ?Sized, R: ?Sized> {
    encoder: Arc<E>,
    reporter: Arc<R>,
}

impl<E, R> Pipeline<E, R>
where
    E: ItemEncoder + ?Sized + 'static,
    R: ConsumptionReporter + ?Sized + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(encoder: Arc<E>, reporter: Arc<R>) -> Self {
        Self { encoder, reporter }
    }

    /// 設定に従ってパイプラインを1回実行
    ///
    /// 手順の順序は固定: チャンネル生成 → カウンタ初期化 → Producer起動 →
    /// Consumer起動 → Producer全完了待ち → クローズ → Consumer全完了待ち。
    pub async fn execute<C>(&self, config: &C) -> PipelineResult<RunSummary>
    where
        C: PipelineConfig + ?Sized,
    {
        validate_config(config)?;
        let start_time = Instant::now();

        // 1. チャンネル
        let (sender, receiver) = bounded::<Item>(config.channel_capacity())?;
        let monitor = sender.monitor();

        // 2. シーケンスカウンタ（実行ごとにゼロから）
        let sequence = Arc::new(SequenceCounter::new());

        tracing::info!(
            producers = config.producer_count(),
            consumers = config.consumer_count(),
            items_per_producer = config.items_per_producer(),
            capacity = config.channel_capacity(),
            delay_ms = config.processing_delay().as_millis() as u64,
            "pipeline starting"
        );

        // 3. Producers
        let mut producers = spawn_producers(
            &sender,
            config.producer_count(),
            config.items_per_producer(),
        );

        // 4. Consumers
        let mut consumers = spawn_consumers(
            &receiver,
            &sequence,
            &self.encoder,
            &self.reporter,
            config.consumer_count(),
            config.processing_delay(),
        );
        // 受信側はConsumerだけが保持する。全Consumerが異常終了した場合は
        // 待機中のProducerがエラーで戻る
        drop(receiver);

        // 5. 全Producerの完了を観測（エラーがあっても全件待つ）
        let produced = await_producers(&mut producers).await;

        // 6. クローズは全Producer完了後にちょうど1回
        sender.close();
        tracing::debug!("channel closed, draining");

        // 7. 全Consumerの完了を観測
        let consumer_outcomes = await_consumers(&mut consumers).await;

        let produced = produced?;
        let mut consumer_outcomes = consumer_outcomes?;
        consumer_outcomes.sort_by_key(|outcome| outcome.consumer_id);

        let channel_stats = monitor.stats();
        if monitor.state() != ChannelState::ClosedEmpty {
            return Err(PipelineError::channel(format!(
                "全Consumer終了後もチャンネルが空になっていません: {:?}",
                monitor.state()
            )));
        }

        let summary = RunSummary {
            produced,
            consumed: consumer_outcomes.iter().map(|o| o.consumed).sum(),
            encoding_failures: consumer_outcomes.iter().map(|o| o.encoding_failures).sum(),
            final_sequence: sequence.current(),
            consumers: consumer_outcomes,
            channel: channel_stats,
            total_processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        tracing::info!(
            produced = summary.produced,
            consumed = summary.consumed,
            encoding_failures = summary.encoding_failures,
            suspended_pushes = summary.channel.suspended_pushes,
            elapsed_ms = summary.total_processing_time_ms,
            "pipeline finished"
        );

        Ok(summary)
    }
}

/// 設定値の検証
fn validate_config<C: PipelineConfig + ?Sized>(config: &C) -> PipelineResult<()> {
    if config.channel_capacity() == 0 {
        return Err(PipelineError::configuration(
            "channel_capacity",
            "1以上である必要があります",
        ));
    }
    if config.consumer_count() == 0 {
        return Err(PipelineError::configuration(
            "consumer_count",
            "1以上である必要があります",
        ));
    }
    Ok(())
}

/// Producer側の完了バリア。最初のエラーを保持しつつ全タスクを待つ
async fn await_producers(producers: &mut JoinSet<PipelineResult<usize>>) -> PipelineResult<usize> {
    let mut produced = 0;
    let mut first_error = None;

    while let Some(joined) = producers.join_next().await {
        match joined.map_err(PipelineError::from).and_then(|result| result) {
            Ok(count) => produced += count,
            Err(error) => {
                tracing::error!(%error, "producer failed");
                first_error.get_or_insert(error);
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(produced),
    }
}

/// Consumer側の完了バリア
async fn await_consumers(
    consumers: &mut JoinSet<ConsumerOutcome>,
) -> PipelineResult<Vec<ConsumerOutcome>> {
    let mut outcomes = Vec::with_capacity(consumers.len());
    let mut first_error = None;

    while let Some(joined) = consumers.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(error) => {
                tracing::error!(%error, "consumer task failed");
                first_error.get_or_insert(PipelineError::task(error));
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(outcomes),
    }
}
