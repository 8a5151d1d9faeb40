// サービス層 - 機能別の具象実装
// コアのトレイトを実装し、エンジンへ注入される

pub mod config;
pub mod encoding;
pub mod logging;
pub mod monitoring;

// 公開API
pub use config::DefaultPipelineConfig;
pub use encoding::JsonItemEncoder;
pub use logging::{init_logging, DEFAULT_LOG_FILTER};
pub use monitoring::{ConsoleReporter, MemoryReporter, NoOpReporter};
