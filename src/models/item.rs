// file: src/models/item.rs
// description: shopping listing models and price coercion
// reference: https://developers.naver.com/docs/serviceapi/search/shopping/shopping.md

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One item of the shopping search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShopItem {
    pub title: String,
    pub link: String,
    pub image: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub lprice: Option<String>,
    #[serde(deserialize_with = "deserialize_price")]
    pub hprice: Option<String>,
    pub mall_name: String,
    pub product_id: String,
    pub product_type: String,
    pub brand: String,
    pub maker: String,
    pub category1: String,
    pub category2: String,
    pub category3: String,
    pub category4: String,
}

/// Aggregation view of a listing. The price stays textual until coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub product_id: String,
    pub brand: Option<String>,
    pub price: Option<String>,
    #[serde(default)]
    pub maker: Option<String>,
    #[serde(default)]
    pub mall_name: Option<String>,
}

impl PricedItem {
    pub fn new(
        product_id: impl Into<String>,
        brand: Option<&str>,
        price: Option<&str>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            brand: brand.map(str::to_string),
            price: price.map(str::to_string),
            maker: None,
            mall_name: None,
        }
    }

    /// Numeric price, or `None` when missing or not coercible.
    pub fn numeric_price(&self) -> Option<f64> {
        self.price.as_deref().and_then(coerce_price)
    }
}

impl From<&ShopItem> for PricedItem {
    fn from(item: &ShopItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            brand: Some(item.brand.clone()),
            price: item.lprice.clone(),
            maker: Some(item.maker.clone()),
            mall_name: Some(item.mall_name.clone()),
        }
    }
}

/// Best-effort conversion of a textual price. Negative and non-finite
/// values count as missing.
pub fn coerce_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// Prices arrive as strings but some payloads carry bare numbers.
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
