//! 数据库基础设施
//!
//! `ProductStore` 是处理器与存储之间唯一的接缝；`CassandraStore` 通过 CQL 驱动访问集群，
//! `MemoryStore` 用于本地运行和测试。

use async_trait::async_trait;
use futures::TryStreamExt;
use rust_decimal::Decimal;
use scylla::frame::value::CqlDecimal;
use scylla::frame::response::result::CqlValue;
use scylla::prepared_statement::PreparedStatement;
use scylla::{Session, SessionBuilder};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::app::products::model::Product;
use crate::config::DatabaseConfig;

const SELECT_PRODUCTS_CQL: &str = "SELECT product_id, product_name, retail_price FROM products";
const INSERT_PRODUCT_CQL: &str =
    "INSERT INTO products (product_id, product_name, retail_price) VALUES (?, ?, ?)";
const UPDATE_PRODUCT_CQL: &str =
    "UPDATE products SET product_name = ?, retail_price = ? WHERE product_id = ? IF EXISTS";
const DELETE_PRODUCT_CQL: &str = "DELETE FROM products WHERE product_id = ?";

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to cluster: {0}")]
    Connect(String),
    #[error("failed to prepare statement: {0}")]
    Prepare(String),
    #[error("failed to execute statement: {0}")]
    Execute(String),
    #[error("malformed row: {0}")]
    Decode(String),
}

/// 商品存储
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 读取整张表
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    /// 按 id 条件更新名称和价格，行不存在时返回 `false`
    async fn update(&self, product: &Product) -> Result<bool, StoreError>;

    /// 按 id 删除，不检查行是否存在
    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError>;
}

/// 连接时预编译的语句
#[derive(Debug)]
struct Statements {
    insert: PreparedStatement,
    update: PreparedStatement,
    delete: PreparedStatement,
}

/// 基于 CQL 驱动的商品存储
///
/// `Session` 内部自带连接池且线程安全，所有请求共享同一个实例。
pub struct CassandraStore {
    session: Session,
    statements: Statements,
}

impl CassandraStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!(
            contact_points = ?config.contact_points,
            keyspace = %config.keyspace,
            "Connecting to cluster"
        );

        let session = config
            .contact_points
            .iter()
            .fold(SessionBuilder::new(), |builder, node| builder.known_node(node))
            .use_keyspace(&config.keyspace, false)
            .build()
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        let statements = Statements {
            insert: prepare(&session, INSERT_PRODUCT_CQL).await?,
            update: prepare(&session, UPDATE_PRODUCT_CQL).await?,
            delete: prepare(&session, DELETE_PRODUCT_CQL).await?,
        };

        info!("Connected to cluster, statements prepared");
        Ok(Self { session, statements })
    }
}

async fn prepare(session: &Session, cql: &str) -> Result<PreparedStatement, StoreError> {
    session
        .prepare(cql)
        .await
        .map_err(|e| StoreError::Prepare(format!("{}: {}", cql, e)))
}

#[async_trait]
impl ProductStore for CassandraStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        // 分页拉取全部行
        let rows: Vec<(Uuid, String, CqlDecimal)> = self
            .session
            .query_iter(SELECT_PRODUCTS_CQL, ())
            .await
            .map_err(|e| StoreError::Execute(e.to_string()))?
            .into_typed::<(Uuid, String, CqlDecimal)>()
            .try_collect()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        debug!(rows = rows.len(), "Fetched products");

        rows.into_iter()
            .map(|(product_id, product_name, price)| {
                Ok(Product {
                    product_id,
                    product_name,
                    retail_price: decimal_from_cql(&price)?,
                })
            })
            .collect()
    }

    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.session
            .execute(
                &self.statements.insert,
                (
                    product.product_id,
                    product.product_name.as_str(),
                    decimal_to_cql(product.retail_price),
                ),
            )
            .await
            .map_err(|e| StoreError::Execute(e.to_string()))?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreError> {
        let result = self
            .session
            .execute(
                &self.statements.update,
                (
                    product.product_name.as_str(),
                    decimal_to_cql(product.retail_price),
                    product.product_id,
                ),
            )
            .await
            .map_err(|e| StoreError::Execute(e.to_string()))?;

        // 轻量事务的结果第一列是 [applied]
        let row = result
            .first_row()
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        row.columns
            .first()
            .and_then(Option::as_ref)
            .and_then(CqlValue::as_boolean)
            .ok_or_else(|| StoreError::Decode("missing [applied] column".to_string()))
    }

    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError> {
        self.session
            .execute(&self.statements.delete, (product_id,))
            .await
            .map_err(|e| StoreError::Execute(e.to_string()))?;
        Ok(())
    }
}

/// `Decimal` 转 CQL decimal：大端补码 varint 尾数 + scale
pub fn decimal_to_cql(value: Decimal) -> CqlDecimal {
    let bytes = value.mantissa().to_be_bytes();

    // 去掉多余的符号扩展字节
    let mut start = 0;
    while start + 1 < bytes.len() {
        let (head, next) = (bytes[start], bytes[start + 1]);
        let redundant = (head == 0x00 && next & 0x80 == 0) || (head == 0xff && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }

    CqlDecimal::from_signed_be_bytes_and_exponent(bytes[start..].to_vec(), value.scale() as i32)
}

/// CQL decimal 转 `Decimal`，超出 96 位尾数或 scale 不在 0..=28 时报错
pub fn decimal_from_cql(value: &CqlDecimal) -> Result<Decimal, StoreError> {
    let (bytes, scale) = value.as_signed_be_bytes_slice_and_exponent();

    if bytes.len() > 16 {
        return Err(StoreError::Decode(format!(
            "decimal mantissa too wide: {} bytes",
            bytes.len()
        )));
    }
    let scale = u32::try_from(scale)
        .map_err(|_| StoreError::Decode(format!("negative decimal scale: {}", scale)))?;

    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xffu8; 16] } else { [0u8; 16] };
    buf[16 - bytes.len()..].copy_from_slice(bytes);

    Decimal::try_from_i128_with_scale(i128::from_be_bytes(buf), scale)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// 内存中的商品存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.products
            .write()
            .await
            .insert(product.product_id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreError> {
        match self.products.write().await.get_mut(&product.product_id) {
            Some(existing) => {
                existing.product_name = product.product_name.clone();
                existing.retail_price = product.retail_price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, product_id: Uuid) -> Result<(), StoreError> {
        self.products.write().await.remove(&product_id);
        Ok(())
    }
}
