// 消費結果の報告
// 出力行の書き出し、エンコード失敗の通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleReporter, MemoryReporter, NoOpReporter};
