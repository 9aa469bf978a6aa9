//! 商品业务服务

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::filter::ProductFilter;
use super::model::{Product, ProductInput};
use crate::core::error::CoreError;
use crate::infrastructure::database::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// 读取全表后在服务内过滤。
    ///
    /// 每次请求都是 O(n) 全表扫描，存储端不做过滤下推，只适用于小规模数据。
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CoreError> {
        let products = self
            .store
            .fetch_all()
            .await
            .map_err(CoreError::storage("Failed to fetch products"))?;

        Ok(products
            .into_iter()
            .filter(|product| filter.matches(product))
            .collect())
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, CoreError> {
        let product = Product::new(input.product_name, input.retail_price);

        self.store
            .insert(&product)
            .await
            .map_err(CoreError::storage("Failed to add product"))?;

        info!("Created product: {} ({})", product.product_name, product.product_id);
        Ok(product)
    }

    /// 行不存在时返回 `NotFound`，存储保持不变
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: ProductInput,
    ) -> Result<Product, CoreError> {
        let product = Product {
            product_id,
            product_name: input.product_name,
            retail_price: input.retail_price,
        };

        let applied = self
            .store
            .update(&product)
            .await
            .map_err(CoreError::storage("Failed to update product"))?;

        if !applied {
            return Err(CoreError::not_found("Product not found"));
        }

        info!("Updated product: {} ({})", product.product_name, product.product_id);
        Ok(product)
    }

    /// 不检查行是否存在
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), CoreError> {
        self.store
            .delete(product_id)
            .await
            .map_err(CoreError::storage("Failed to remove product"))?;

        info!("Removed product: {}", product_id);
        Ok(())
    }
}
