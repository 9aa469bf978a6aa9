//! 商品数据模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 商品，唯一的实体。`product_id` 创建时由服务端生成，之后不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: Uuid,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub retail_price: Decimal,
}

impl Product {
    /// 用新生成的 id 创建商品
    pub fn new(product_name: String, retail_price: Decimal) -> Self {
        Self {
            product_id: Uuid::new_v4(),
            product_name,
            retail_price,
        }
    }
}

/// 创建与更新共用的请求体，字段缺失时为 `None`
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub retail_price: Option<Decimal>,
}

/// 字段齐全的商品输入
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub product_name: String,
    pub retail_price: Decimal,
}

impl ProductPayload {
    /// 两个字段都存在时返回输入，否则返回 `None`
    pub fn into_input(self) -> Option<ProductInput> {
        Some(ProductInput {
            product_name: self.product_name?,
            retail_price: self.retail_price?,
        })
    }
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

/// 列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}
