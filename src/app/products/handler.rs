//! 商品处理器

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::filter::ProductFilter;
use super::model::{ListQuery, ProductInput, ProductList, ProductPayload};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::response::MessageResponse;

const INVALID_PAYLOAD: &str = "Invalid JSON payload";
const MISSING_FIELDS: &str = "Product name or price missing in the request";
const MISSING_ID: &str = "Product ID is missing in the request";
const INVALID_ID: &str = "Invalid product ID";

/// 解析路径中的商品 id，更新和删除共用
pub fn parse_product_id(raw: &str) -> Result<Uuid, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::bad_request(MISSING_ID));
    }
    Uuid::parse_str(raw).map_err(|_| CoreError::bad_request(INVALID_ID))
}

/// 解析请求体；不要求 Content-Type
pub fn parse_payload(body: &[u8]) -> Result<ProductInput, CoreError> {
    // 语法错误、非对象、字段类型不对都算无效负载
    let payload: ProductPayload =
        serde_json::from_slice(body).map_err(|_| CoreError::bad_request(INVALID_PAYLOAD))?;

    payload
        .into_input()
        .ok_or_else(|| CoreError::bad_request(MISSING_FIELDS))
}

/// GET /products?filter=
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductList>, CoreError> {
    let filter = ProductFilter::new(query.filter.as_deref());
    let products = state.product_service.list_products(&filter).await?;
    Ok(Json(ProductList { products }))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), CoreError> {
    let input = parse_payload(&body)?;
    let product = state.product_service.create_product(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product added successfully").with_product_id(product.product_id)),
    ))
}

/// PUT /products/:product_id
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, CoreError> {
    let product_id = parse_product_id(&product_id)?;
    let input = parse_payload(&body)?;
    state.product_service.update_product(product_id, input).await?;

    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// DELETE /products/:product_id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    let product_id = parse_product_id(&product_id)?;
    state.product_service.delete_product(product_id).await?;

    Ok(Json(MessageResponse::new("Product removed successfully")))
}

/// PUT/DELETE /products/ 未给出 id
pub async fn missing_product_id() -> CoreError {
    CoreError::bad_request(MISSING_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(err: CoreError) -> String {
        match err {
            CoreError::BadRequest(msg) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_product_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_product_id(&id.to_string()).unwrap(), id);
        assert_eq!(bad_request_message(parse_product_id("").unwrap_err()), MISSING_ID);
        assert_eq!(bad_request_message(parse_product_id("  ").unwrap_err()), MISSING_ID);
        assert_eq!(bad_request_message(parse_product_id("not-a-uuid").unwrap_err()), INVALID_ID);
    }

    #[test]
    fn test_parse_payload() {
        let input = parse_payload(br#"{"product_name":"Widget","retail_price":19.99}"#).unwrap();
        assert_eq!(input.product_name, "Widget");
        assert_eq!(input.retail_price.to_string(), "19.99");

        // 整数价格
        let input = parse_payload(br#"{"product_name":"Lamp","retail_price":20}"#).unwrap();
        assert_eq!(input.retail_price.to_string(), "20");
    }

    #[test]
    fn test_parse_payload_errors() {
        let malformed: [&[u8]; 4] = [
            b"{not json",
            b"",
            b"[1,2]",
            br#"{"product_name":1,"retail_price":2}"#,
        ];
        for body in malformed {
            assert_eq!(bad_request_message(parse_payload(body).unwrap_err()), INVALID_PAYLOAD);
        }

        let incomplete: [&[u8]; 4] = [
            br#"{"product_name":"Widget"}"#,
            br#"{"retail_price":1.5}"#,
            br#"{"product_name":null,"retail_price":1.5}"#,
            b"{}",
        ];
        for body in incomplete {
            assert_eq!(bad_request_message(parse_payload(body).unwrap_err()), MISSING_FIELDS);
        }
    }
}
