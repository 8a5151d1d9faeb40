// パイプライン用のカスタムエラー型定義

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {field} - {reason}")]
    ConfigurationError { field: String, reason: String },

    #[error("チャンネルエラー: {message}")]
    ChannelError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// チャンネルエラーの作成
    pub fn channel(message: impl Into<String>) -> Self {
        Self::ChannelError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::TaskError { source: error }
    }
}

/// アイテムのエンコード失敗
///
/// Consumer内で報告してスキップされる。Coordinatorには伝播しない。
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JSONエンコードエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("不正なアイテム状態: {0}")]
    InvalidItem(String),
}

impl EncodeError {
    pub fn invalid_item(reason: impl Into<String>) -> Self {
        Self::InvalidItem(reason.into())
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
