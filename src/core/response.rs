//! 核心响应处理模块

use serde::Serialize;
use serde_json::Value;

/// 创建成功后的响应
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(rename = "insertedId")]
    pub inserted_id: Value,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, inserted_id: Value) -> Self {
        Self {
            message: message.into(),
            inserted_id,
        }
    }
}
