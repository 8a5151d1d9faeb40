// Producer - アイテム生成と配信

use super::channel::ChannelSender;
use crate::core::{Item, PipelineResult, PAYLOAD_RANGE};
use rand::Rng;
use tokio::task::JoinSet;

/// 単一Producer: `count`件のアイテムを生成してチャンネルへ送信
///
/// 送信側ハンドルはタスク終了時に破棄される。チャンネルのクローズは行わない。
pub async fn run_producer(
    channel: ChannelSender<Item>,
    producer_id: usize,
    count: usize,
) -> PipelineResult<usize> {
    for _ in 0..count {
        let payload_id = rand::rng().random_range(PAYLOAD_RANGE);
        channel.push(Item::create(payload_id, producer_id)).await?;
    }
    tracing::debug!(producer_id, produced = count, "producer finished");
    Ok(count)
}

/// Producers: `producer_count`個のProducerを起動
///
/// 返される`JoinSet`がProducer側の完了バリアになる。
pub fn spawn_producers(
    channel: &ChannelSender<Item>,
    producer_count: usize,
    items_per_producer: usize,
) -> JoinSet<PipelineResult<usize>> {
    let mut producers = JoinSet::new();
    for producer_id in 0..producer_count {
        producers.spawn(run_producer(
            channel.clone(),
            producer_id,
            items_per_producer,
        ));
    }
    producers
}
