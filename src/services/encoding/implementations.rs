// アイテムエンコードの具象実装

use crate::core::{EncodeError, Item, ItemEncoder};

/// JSON形式のエンコーダ
///
/// フィールド名は `Id` / `Timestamp` / `ProducerId`。
#[derive(Debug, Default, Clone)]
pub struct JsonItemEncoder;

impl JsonItemEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ItemEncoder for JsonItemEncoder {
    fn encode(&self, item: &Item) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(item)?)
    }
}
