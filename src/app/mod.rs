//! 路由

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

use crate::core::error::CoreError;
use crate::core::middleware::{cors_layer, preflight_middleware, request_logging_middleware};
use crate::infrastructure::database::ProductStore;

pub mod products;

use products::{handler, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            product_service: ProductService::new(store),
        }
    }
}

/// 创建路由
///
/// 中间件由外到内：预检应答、请求日志、CORS 响应头。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/",
            put(handler::missing_product_id).delete(handler::missing_product_id),
        )
        .route(
            "/products/:product_id",
            put(handler::update_product).delete(handler::delete_product),
        )
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(preflight_middleware))
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(cors_layer()),
        )
        .with_state(state)
}

async fn route_not_found() -> CoreError {
    CoreError::not_found("Route not found")
}
