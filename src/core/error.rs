//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::infrastructure::database::StoreError;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// 存储层失败，`context` 描述失败的操作
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl CoreError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        CoreError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CoreError::NotFound(msg.into())
    }

    /// 给存储错误附加操作上下文，配合 `map_err` 使用
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| CoreError::Storage { context, source }
    }
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            error: error.into(),
            detail,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, None)),
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg, None)),
            CoreError::Storage { context, source } => {
                error!(error = ?source, "{}: {}", context, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(context, Some(source.to_string())),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
