// 全Consumerで共有されるシーケンスカウンタ

use std::sync::atomic::{AtomicI32, Ordering};

/// アトミックな単調増加カウンタ
///
/// Coordinatorが所有し、`Arc`経由で各Consumerに渡す。
/// 外部ロックなしで任意数のタスクから同時に呼び出せる。
#[derive(Debug, Default)]
pub struct SequenceCounter {
    value: AtomicI32,
}

impl SequenceCounter {
    pub const fn new() -> Self {
        Self {
            value: AtomicI32::new(0),
        }
    }

    /// 1加算し、加算後の値を返す
    pub fn increment(&self) -> i32 {
        self.value.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// 現在値を取得
    pub fn current(&self) -> i32 {
        self.value.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_increment_returns_new_value() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_gap_free() {
        let counter = Arc::new(SequenceCounter::new());
        let tasks = 8;
        let per_task = 500;

        let mut handles = Vec::new();
        for _ in 0..tasks {
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let mut values = Vec::with_capacity(per_task);
                for _ in 0..per_task {
                    values.push(counter.increment());
                    tokio::task::yield_now().await;
                }
                values
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.await.unwrap() {
                // 同じ値が2回返されてはならない
                assert!(seen.insert(value));
            }
        }

        let total = (tasks * per_task) as i32;
        let expected: HashSet<i32> = (1..=total).collect();
        assert_eq!(seen, expected);
        assert_eq!(counter.current(), total);
    }
}
