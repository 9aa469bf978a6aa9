//! 列表过滤规则

use rust_decimal::Decimal;
use std::str::FromStr;

use super::model::Product;

/// 商品列表过滤器
///
/// 以下任一条件成立即匹配：
/// - 过滤串为空
/// - 商品名的小写形式以过滤串的小写形式开头
/// - 过滤串能解析为数字，且价格的十进制字符串以过滤串开头（字面前缀，不是数值比较）
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    raw: String,
    lowercase: String,
    numeric: bool,
}

impl ProductFilter {
    pub fn new(filter: Option<&str>) -> Self {
        let raw = filter.unwrap_or_default().to_string();
        Self {
            lowercase: raw.to_lowercase(),
            numeric: !raw.is_empty() && Decimal::from_str(&raw).is_ok(),
            raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() || product.product_name.to_lowercase().starts_with(&self.lowercase) {
            return true;
        }

        self.numeric && price_text(product.retail_price).starts_with(&self.raw)
    }
}

/// 价格的十进制字符串形式，去掉多余的尾随零
fn price_text(price: Decimal) -> String {
    price.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(name: &str, price: &str) -> Product {
        Product::new(name.to_string(), Decimal::from_str(price).unwrap())
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::new(None);
        assert!(filter.matches(&product("Widget", "19.99")));
        assert!(filter.matches(&product("", "0")));

        let filter = ProductFilter::new(Some(""));
        assert!(filter.matches(&product("Gadget", "5")));
    }

    #[test]
    fn test_name_prefix_is_case_insensitive() {
        let filter = ProductFilter::new(Some("wid"));
        assert!(filter.matches(&product("Widget", "1")));
        assert!(filter.matches(&product("WIDE screen", "1")));
        assert!(!filter.matches(&product("Gadget", "1")));
        // 只匹配前缀
        assert!(!filter.matches(&product("Big widget", "1")));

        let filter = ProductFilter::new(Some("WiD"));
        assert!(filter.matches(&product("widget", "1")));
    }

    #[test]
    fn test_price_prefix_is_literal() {
        let filter = ProductFilter::new(Some("19.9"));
        assert!(filter.matches(&product("Widget", "19.99")));
        assert!(filter.matches(&product("Widget", "19.90")));
        assert!(!filter.matches(&product("Widget", "119.99")));
        assert!(!filter.matches(&product("Widget", "20")));
    }

    #[test]
    fn test_price_text_is_normalized() {
        assert_eq!(price_text(Decimal::from_str("20.00").unwrap()), "20");
        assert_eq!(price_text(Decimal::from_str("19.90").unwrap()), "19.9");

        let filter = ProductFilter::new(Some("20.0"));
        assert!(!filter.matches(&product("Lamp", "20.00")));
        let filter = ProductFilter::new(Some("20"));
        assert!(filter.matches(&product("Lamp", "20.00")));
    }

    #[test]
    fn test_non_numeric_filter_skips_price() {
        let filter = ProductFilter::new(Some("19.9x"));
        assert!(!filter.matches(&product("Widget", "19.9")));

        // 数字开头的商品名仍按名字匹配
        let filter = ProductFilter::new(Some("3d"));
        assert!(filter.matches(&product("3D printer", "300")));
    }
}
