// Consumer - 並列ワーカー機能

use super::channel::ChannelReceiver;
use crate::core::{ConsumerOutcome, ConsumptionReporter, Item, ItemEncoder, SequenceCounter};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// 単一Consumer: チャンネルが終端に達するまでアイテムを処理
pub async fn run_consumer<E, R>(
    consumer_id: usize,
    channel: ChannelReceiver<Item>,
    sequence: Arc<SequenceCounter>,
    encoder: Arc<E>,
    reporter: Arc<R>,
    processing_delay: Duration,
) -> ConsumerOutcome
where
    E: ItemEncoder + ?Sized,
    R: ConsumptionReporter + ?Sized,
{
    let mut outcome = ConsumerOutcome {
        consumer_id,
        ..Default::default()
    };

    while let Some(item) = channel.pop().await {
        let sequence_number = sequence.increment();

        match encoder.encode(&item) {
            Ok(encoded) => {
                reporter
                    .report_consumed(sequence_number, &encoded, consumer_id)
                    .await;
            }
            Err(error) => {
                // ローカルで回復: 報告してスキップし、ループは継続
                tracing::warn!(consumer_id, sequence = sequence_number, %error, "failed to encode item");
                reporter
                    .report_encoding_failure(sequence_number, consumer_id, &error.to_string())
                    .await;
                outcome.encoding_failures += 1;
            }
        }
        outcome.consumed += 1;

        if !processing_delay.is_zero() {
            tokio::time::sleep(processing_delay).await;
        }
    }

    tracing::debug!(
        consumer_id,
        consumed = outcome.consumed,
        "consumer reached end of stream"
    );
    outcome
}

/// Consumers: 並列ワーカープール
///
/// 返される`JoinSet`がConsumer側の完了バリアになる。
pub fn spawn_consumers<E, R>(
    channel: &ChannelReceiver<Item>,
    sequence: &Arc<SequenceCounter>,
    encoder: &Arc<E>,
    reporter: &Arc<R>,
    consumer_count: usize,
    processing_delay: Duration,
) -> JoinSet<ConsumerOutcome>
where
    E: ItemEncoder + ?Sized + 'static,
    R: ConsumptionReporter + ?Sized + 'static,
{
    let mut consumers = JoinSet::new();
    for consumer_id in 0..consumer_count {
        consumers.spawn(run_consumer(
            consumer_id,
            channel.clone(),
            Arc::clone(sequence),
            Arc::clone(encoder),
            Arc::clone(reporter),
            processing_delay,
        ));
    }
    consumers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::{MockConsumptionReporter, MockItemEncoder};
    use crate::core::EncodeError;
    use crate::engine::channel::bounded;
    use crate::services::{JsonItemEncoder, MemoryReporter};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_single_consumer_reports_each_item() {
        let (tx, rx) = bounded::<Item>(10).unwrap();
        for payload in 0..3 {
            tx.push(Item::create(payload, 0)).await.unwrap();
        }
        tx.close();

        let reporter = Arc::new(MemoryReporter::new());
        let outcome = run_consumer(
            7,
            rx,
            Arc::new(SequenceCounter::new()),
            Arc::new(JsonItemEncoder::new()),
            Arc::clone(&reporter),
            Duration::ZERO,
        )
        .await;

        assert_eq!(outcome.consumer_id, 7);
        assert_eq!(outcome.consumed, 3);
        assert_eq!(outcome.encoding_failures, 0);

        let records = reporter.records();
        let sequences: Vec<i32> = records.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(records.iter().all(|r| r.consumer_id == 7));
        assert!(records[0].line().starts_with("element 1 is: {"));
        assert!(records[0].line().ends_with(", consumed by 7"));
    }

    #[tokio::test]
    async fn test_consumer_skips_encoding_failures() {
        let (tx, rx) = bounded::<Item>(10).unwrap();
        for payload in [1, 2, 3] {
            tx.push(Item::create(payload, 0)).await.unwrap();
        }
        tx.close();

        // 2番目のアイテムだけエンコードに失敗させる
        let mut encoder = MockItemEncoder::new();
        encoder.expect_encode().returning(|item| {
            if item.id() == 2 {
                Err(EncodeError::invalid_item("payload 2 rejected"))
            } else {
                Ok(format!("payload {}", item.id()))
            }
        });

        let mut reporter = MockConsumptionReporter::new();
        reporter
            .expect_report_consumed()
            .times(2)
            .return_const(());
        reporter
            .expect_report_encoding_failure()
            .withf(|sequence, consumer_id, error| {
                *sequence == 2 && *consumer_id == 0 && error.contains("payload 2 rejected")
            })
            .times(1)
            .return_const(());

        let sequence = Arc::new(SequenceCounter::new());
        let outcome = run_consumer(
            0,
            rx,
            Arc::clone(&sequence),
            Arc::new(encoder),
            Arc::new(reporter),
            Duration::ZERO,
        )
        .await;

        assert_eq!(outcome.consumed, 3);
        assert_eq!(outcome.encoding_failures, 1);
        // 失敗したアイテムもシーケンス番号を消費する
        assert_eq!(sequence.current(), 3);
    }

    #[tokio::test]
    async fn test_consumer_terminates_on_empty_closed_channel() {
        let (tx, rx) = bounded::<Item>(1).unwrap();
        tx.close();

        let reporter = Arc::new(MemoryReporter::new());
        let outcome = run_consumer(
            0,
            rx,
            Arc::new(SequenceCounter::new()),
            Arc::new(JsonItemEncoder::new()),
            Arc::clone(&reporter),
            Duration::from_millis(10),
        )
        .await;

        assert_eq!(outcome.consumed, 0);
        assert!(reporter.records().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_consumer_pool_shares_sequence() {
        let (tx, rx) = bounded::<Item>(8).unwrap();
        let sequence = Arc::new(SequenceCounter::new());
        let encoder = Arc::new(JsonItemEncoder::new());
        let reporter = Arc::new(MemoryReporter::new());

        let mut consumers = spawn_consumers(
            &rx,
            &sequence,
            &encoder,
            &reporter,
            4,
            Duration::from_millis(1),
        );

        for payload in 0..40 {
            tx.push(Item::create(payload % 100, 0)).await.unwrap();
        }
        tx.close();

        let mut consumed = 0;
        let mut consumer_ids = HashSet::new();
        while let Some(result) = consumers.join_next().await {
            let outcome = result.unwrap();
            consumed += outcome.consumed;
            consumer_ids.insert(outcome.consumer_id);
        }

        assert_eq!(consumed, 40);
        assert_eq!(consumer_ids, (0..4).collect::<HashSet<_>>());

        let sequences: HashSet<i32> = reporter.records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, (1..=40).collect::<HashSet<_>>());
    }
}
