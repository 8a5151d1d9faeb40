// エンジン層 - 並列処理とオーケストレーション
// チャンネル、Producer、Consumerを組み合わせてパイプラインを構成

pub mod api;
pub mod channel;
pub mod consumer;
pub mod pipeline;
pub mod producer;

// 公開API
pub use api::{create_console_pipeline, create_quiet_pipeline, run_to_console};
pub use channel::{bounded, ChannelMonitor, ChannelReceiver, ChannelSender};
pub use consumer::{run_consumer, spawn_consumers};
pub use pipeline::Pipeline;
pub use producer::{run_producer, spawn_producers};
