// 高レベル公開API
// Pipelineを簡単に使用できるようにするための便利な関数

use super::Pipeline;
use crate::{
    core::{PipelineConfig, PipelineResult, RunSummary},
    services::{ConsoleReporter, JsonItemEncoder},
};
use std::sync::Arc;

/// JSONエンコード + コンソール出力のパイプラインを作成
pub fn create_console_pipeline() -> Pipeline<JsonItemEncoder, ConsoleReporter> {
    Pipeline::new(
        Arc::new(JsonItemEncoder::new()),
        Arc::new(ConsoleReporter::new()),
    )
}

/// 出力を抑制したパイプラインを作成（計測・バックグラウンド用）
pub fn create_quiet_pipeline() -> Pipeline<JsonItemEncoder, ConsoleReporter> {
    Pipeline::new(
        Arc::new(JsonItemEncoder::new()),
        Arc::new(ConsoleReporter::quiet()),
    )
}

/// 設定を指定してコンソール出力で1回実行
pub async fn run_to_console<C>(config: &C, quiet: bool) -> PipelineResult<RunSummary>
where
    C: PipelineConfig + ?Sized,
{
    let pipeline = if quiet {
        create_quiet_pipeline()
    } else {
        create_console_pipeline()
    };
    pipeline.execute(config).await
}
