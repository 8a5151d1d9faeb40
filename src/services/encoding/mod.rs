// アイテムの報告用エンコード

pub mod implementations;

// 公開API
pub use implementations::JsonItemEncoder;
