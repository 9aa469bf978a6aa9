//! 核心中间件模块：CORS 与请求日志

use axum::{
    extract::Request,
    http::{
        header::{
            HeaderName, ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN,
        },
        Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// 允许的跨域方法
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

const ALLOWED_METHODS_VALUE: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS_VALUE: &str =
    "x-requested-with, Access-Control-Allow-Origin, origin, Content-Type, accept";

/// 允许的跨域请求头
pub fn allowed_headers() -> [HeaderName; 5] {
    [
        HeaderName::from_static("x-requested-with"),
        ACCESS_CONTROL_ALLOW_ORIGIN,
        ORIGIN,
        CONTENT_TYPE,
        ACCEPT,
    ]
}

/// 宽松的 CORS 策略，任意来源
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers())
}

/// 预检中间件：所有 OPTIONS 请求直接返回 200、CORS 头和空的 JSON 类型响应体
pub async fn preflight_middleware(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS_VALUE),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS_VALUE),
            (CONTENT_TYPE, "application/json"),
        ],
    )
        .into_response()
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();

    info!(
        %method,
        %uri,
        status = status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
