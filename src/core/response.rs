//! 核心响应处理模块

use serde::Serialize;
use uuid::Uuid;

/// 写操作成功时的消息体
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            product_id: None,
        }
    }

    pub fn with_product_id(mut self, product_id: Uuid) -> Self {
        self.product_id = Some(product_id);
        self
    }
}
