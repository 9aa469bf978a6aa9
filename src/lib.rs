//! # 商品 CRUD 服务
//!
//! 基于 Axum 的 REST 服务，对外暴露 `products` 资源，数据存放在 Cassandra / ScyllaDB 中：
//! - `core`: 错误、响应结构、中间件（CORS、请求日志）
//! - `app`: 路由与商品的处理器、服务、过滤逻辑
//! - `infrastructure`: 数据库网关（CQL 与内存两种实现）、日志
//! - `config`: TOML 配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{create_router, AppState};
pub use config::{Config, ConfigError};
pub use infrastructure::database::{ProductStore, StoreError};
