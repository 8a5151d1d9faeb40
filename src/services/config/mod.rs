// パイプラインの設定管理

pub mod implementations;

// 公開API
pub use implementations::DefaultPipelineConfig;
