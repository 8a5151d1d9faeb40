// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod sequence;
pub mod traits;
pub mod types;

// 公開API
pub use error::{EncodeError, PipelineError, PipelineResult};
pub use sequence::SequenceCounter;
pub use traits::{ConsumptionReporter, ItemEncoder, PipelineConfig};
pub use types::{
    format_report_line, ChannelState, ChannelStats, ConsumedRecord, ConsumerOutcome,
    EncodingFailureRecord, Item, RunSummary, PAYLOAD_RANGE,
};
