// BoundedChannel - 容量制限付きFIFOチャンネル
// tokio::sync::mpscを基盤に、複数Consumer対応と計測を追加

use crate::core::{ChannelState, ChannelStats, PipelineError, PipelineResult};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::mpsc::{self, error::TrySendError};

/// 送受信側で共有する計測値とクローズ状態
#[derive(Debug)]
struct ChannelShared {
    capacity: usize,
    closed: AtomicBool,
    pushed: AtomicU64,
    popped: AtomicU64,
    suspended_pushes: AtomicU64,
    peak_occupancy: AtomicUsize,
}

impl ChannelShared {
    fn state(&self) -> ChannelState {
        if !self.closed.load(Ordering::Acquire) {
            return ChannelState::OpenAccepting;
        }
        // popped を先に読むことで pushed >= popped が保たれる
        let popped = self.popped.load(Ordering::Acquire);
        let pushed = self.pushed.load(Ordering::Acquire);
        if pushed > popped {
            ChannelState::ClosedDraining
        } else {
            ChannelState::ClosedEmpty
        }
    }

    fn stats(&self) -> ChannelStats {
        ChannelStats {
            capacity: self.capacity,
            pushed: self.pushed.load(Ordering::Acquire),
            popped: self.popped.load(Ordering::Acquire),
            suspended_pushes: self.suspended_pushes.load(Ordering::Acquire),
            peak_occupancy: self.peak_occupancy.load(Ordering::Acquire),
        }
    }
}

/// 容量`capacity`のチャンネルを作成
///
/// `capacity`が0の場合はエラー。
pub fn bounded<T>(capacity: usize) -> PipelineResult<(ChannelSender<T>, ChannelReceiver<T>)> {
    if capacity == 0 {
        return Err(PipelineError::configuration(
            "channel_capacity",
            "1以上である必要があります",
        ));
    }

    let (tx, rx) = mpsc::channel(capacity);
    let shared = Arc::new(ChannelShared {
        capacity,
        closed: AtomicBool::new(false),
        pushed: AtomicU64::new(0),
        popped: AtomicU64::new(0),
        suspended_pushes: AtomicU64::new(0),
        peak_occupancy: AtomicUsize::new(0),
    });

    Ok((
        ChannelSender {
            tx,
            shared: Arc::clone(&shared),
        },
        ChannelReceiver {
            rx: Arc::new(tokio::sync::Mutex::new(rx)),
            shared,
        },
    ))
}

/// 送信側ハンドル
///
/// Producerごとに`clone`して渡す。全ての送信側が破棄されるとチャンネルは
/// 終端に達する。`close`はハンドルを消費するため二重クローズは起こり得ない。
#[derive(Debug)]
pub struct ChannelSender<T> {
    tx: mpsc::Sender<T>,
    shared: Arc<ChannelShared>,
}

impl<T> Clone for ChannelSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ChannelSender<T> {
    /// アイテムを送信。満杯なら空きができるまで待機する
    pub async fn push(&self, item: T) -> PipelineResult<()> {
        let permit = match self.tx.try_reserve() {
            Ok(permit) => permit,
            Err(TrySendError::Full(())) => {
                self.shared.suspended_pushes.fetch_add(1, Ordering::AcqRel);
                self.tx
                    .reserve()
                    .await
                    .map_err(|_| PipelineError::channel("受信側が全て破棄されています"))?
            }
            Err(TrySendError::Closed(())) => {
                return Err(PipelineError::channel("受信側が全て破棄されています"));
            }
        };

        // 送信前に加算し、popped が pushed を追い越さないようにする
        self.shared.pushed.fetch_add(1, Ordering::AcqRel);
        permit.send(item);
        self.record_occupancy();
        Ok(())
    }

    fn record_occupancy(&self) {
        // 予約済みスロットを含むためtokio側の容量を超えることはない
        let occupied = self.tx.max_capacity() - self.tx.capacity();
        self.shared
            .peak_occupancy
            .fetch_max(occupied, Ordering::AcqRel);
    }

    /// チャンネルをクローズ（OpenAccepting → ClosedDraining）
    ///
    /// 他の送信側が全て破棄された後に呼び出すこと。
    pub fn close(self) {
        let Self { tx, shared } = self;
        shared.closed.store(true, Ordering::Release);
        drop(tx);
    }

    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    pub fn stats(&self) -> ChannelStats {
        self.shared.stats()
    }

    /// 状態参照用のハンドルを取得
    pub fn monitor(&self) -> ChannelMonitor {
        ChannelMonitor {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// 状態と計測値だけを参照するハンドル
///
/// 送信側・受信側のどちらも保持しないため、チャンネルの終端判定に影響しない。
#[derive(Debug, Clone)]
pub struct ChannelMonitor {
    shared: Arc<ChannelShared>,
}

impl ChannelMonitor {
    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    pub fn stats(&self) -> ChannelStats {
        self.shared.stats()
    }
}

/// 受信側ハンドル
///
/// 複数Consumerで共有するため内部で`Mutex`に包む。
#[derive(Debug)]
pub struct ChannelReceiver<T> {
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<T>>>,
    shared: Arc<ChannelShared>,
}

impl<T> Clone for ChannelReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ChannelReceiver<T> {
    /// 次のアイテムを取得
    ///
    /// 空でオープン中なら待機し、クローズ済みで空なら`None`（終端）を返す。
    pub async fn pop(&self) -> Option<T> {
        let item = {
            let mut rx = self.rx.lock().await;
            rx.recv().await
        };
        if item.is_some() {
            self.shared.popped.fetch_add(1, Ordering::AcqRel);
        }
        item
    }

    pub fn state(&self) -> ChannelState {
        self.shared.state()
    }

    pub fn stats(&self) -> ChannelStats {
        self.shared.stats()
    }
}
