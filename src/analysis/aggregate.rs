// file: src/analysis/aggregate.rs
// description: per-group listing counts and price statistics
// reference: group-by aggregation over shopping search results

use crate::error::{InsightError, Result};
use crate::models::{BrandShare, BrandStats, PricedItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Listing field used to partition items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupKey {
    #[default]
    Brand,
    Maker,
    MallName,
}

impl GroupKey {
    /// Field name in the shopping search payload.
    pub fn field_name(&self) -> &'static str {
        match self {
            GroupKey::Brand => "brand",
            GroupKey::Maker => "maker",
            GroupKey::MallName => "mallName",
        }
    }

    fn label<'a>(&self, item: &'a PricedItem) -> &'a str {
        let value = match self {
            GroupKey::Brand => &item.brand,
            GroupKey::Maker => &item.maker,
            GroupKey::MallName => &item.mall_name,
        };
        value.as_deref().unwrap_or("")
    }
}

impl FromStr for GroupKey {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "brand" => Ok(GroupKey::Brand),
            "maker" => Ok(GroupKey::Maker),
            "mallName" | "mall_name" => Ok(GroupKey::MallName),
            other => Err(InsightError::InvalidInput(format!(
                "unknown group key '{}' (expected brand, maker or mallName)",
                other
            ))),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Default)]
struct GroupAccumulator {
    item_count: usize,
    priced: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl GroupAccumulator {
    fn push(&mut self, price: Option<f64>) {
        self.item_count += 1;
        if let Some(price) = price {
            self.priced += 1;
            self.sum += price;
            self.min = Some(self.min.map_or(price, |m| m.min(price)));
            self.max = Some(self.max.map_or(price, |m| m.max(price)));
        }
    }

    fn finish(self, label: &str) -> BrandStats {
        BrandStats {
            brand: label.to_string(),
            item_count: self.item_count,
            mean_price: (self.priced > 0).then(|| self.sum / self.priced as f64),
            min_price: self.min,
            max_price: self.max,
        }
    }
}

/// Groups listings by `key` and returns the `top_k` largest groups.
///
/// Every listing counts towards its group's `item_count`; listings whose price
/// cannot be coerced are left out of the mean, min and max only. Missing and
/// empty labels form one group labelled `""`. Groups are ordered by
/// `item_count` descending, then label ascending.
pub fn aggregate_by_group(items: &[PricedItem], key: GroupKey, top_k: usize) -> Vec<BrandStats> {
    let mut groups: BTreeMap<&str, GroupAccumulator> = BTreeMap::new();

    for item in items {
        groups
            .entry(key.label(item))
            .or_default()
            .push(item.numeric_price());
    }

    let group_count = groups.len();

    // BTreeMap yields labels ascending and the sort is stable
    let mut stats: Vec<BrandStats> = groups
        .into_iter()
        .map(|(label, acc)| acc.finish(label))
        .collect();
    stats.sort_by(|a, b| b.item_count.cmp(&a.item_count));
    stats.truncate(top_k);

    debug!(
        "Aggregated {} items into {} {} groups, returning {}",
        items.len(),
        group_count,
        key,
        stats.len()
    );

    stats
}

/// Aggregates loosely-typed JSON records such as raw search items.
///
/// Each record must be an object carrying the group key field (its value may
/// be null). The price is read from `lprice`, falling back to `price` when
/// `lprice` is absent or null.
pub fn aggregate_records(
    records: &[Value],
    key: GroupKey,
    top_k: usize,
) -> Result<Vec<BrandStats>> {
    let items = records
        .iter()
        .enumerate()
        .map(|(index, record)| record_to_item(index, record, key))
        .collect::<Result<Vec<_>>>()?;

    Ok(aggregate_by_group(&items, key, top_k))
}

fn record_to_item(index: usize, record: &Value, key: GroupKey) -> Result<PricedItem> {
    let object = record.as_object().ok_or_else(|| {
        InsightError::InvalidInput(format!("record {} is not an object", index))
    })?;

    let label = match object.get(key.field_name()) {
        None => {
            return Err(InsightError::InvalidInput(format!(
                "record {} has no '{}' field",
                index,
                key.field_name()
            )));
        }
        Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => {
            return Err(InsightError::InvalidInput(format!(
                "record {} has a non-scalar '{}' field",
                index,
                key.field_name()
            )));
        }
    };

    let price = object
        .get("lprice")
        .and_then(scalar_text)
        .or_else(|| object.get("price").and_then(scalar_text));

    let product_id = object
        .get("productId")
        .and_then(scalar_text)
        .unwrap_or_default();

    let mut item = PricedItem {
        product_id,
        brand: None,
        price,
        maker: None,
        mall_name: None,
    };
    match key {
        GroupKey::Brand => item.brand = label,
        GroupKey::Maker => item.maker = label,
        GroupKey::MallName => item.mall_name = label,
    }

    Ok(item)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Most common brands with their share of the listings covered by the
/// returned brands. Grouping and order match [`aggregate_by_group`], so
/// unbranded listings appear as the `""` brand.
pub fn brand_share(items: &[PricedItem], top: usize) -> Vec<BrandShare> {
    let ranked = aggregate_by_group(items, GroupKey::Brand, top);
    let total: usize = ranked.iter().map(|stats| stats.item_count).sum();

    ranked
        .into_iter()
        .map(|stats| BrandShare {
            share: stats.item_count as f64 / total as f64 * 100.0,
            brand: stats.brand,
            item_count: stats.item_count,
        })
        .collect()
}
