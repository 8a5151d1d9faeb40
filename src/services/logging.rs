// ログ出力の初期化
// 診断ログは標準エラーへ。標準出力は消費結果の出力先として空けておく

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG`未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info";

/// tracingサブスクライバを登録
///
/// 二重登録はエラーになる。
pub fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
