// file: src/analysis/prices.rs
// description: price distribution statistics over shopping listings

use crate::models::{PriceBucket, PriceSummary, PricedItem};

fn valid_prices(items: &[PricedItem]) -> Vec<f64> {
    let mut prices: Vec<f64> = items.iter().filter_map(PricedItem::numeric_price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));
    prices
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Count, mean, sample deviation and quartiles of the usable prices.
pub fn describe_prices(items: &[PricedItem]) -> Option<PriceSummary> {
    let prices = valid_prices(items);
    let (&min, &max) = (prices.first()?, prices.last()?);

    let count = prices.len();
    let mean = prices.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance =
            prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });

    Some(PriceSummary {
        count,
        mean,
        std,
        min,
        p25: quantile(&prices, 0.25),
        median: quantile(&prices, 0.5),
        p75: quantile(&prices, 0.75),
        max,
    })
}

/// Equal-width histogram between the lowest and highest usable price.
pub fn price_histogram(items: &[PricedItem], bins: usize) -> Vec<PriceBucket> {
    let prices = valid_prices(items);
    let (Some(&min), Some(&max)) = (prices.first(), prices.last()) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }

    if max == min {
        return vec![PriceBucket {
            lower: min,
            upper: max,
            count: prices.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut buckets: Vec<PriceBucket> = (0..bins)
        .map(|i| PriceBucket {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for price in prices {
        let index = (((price - min) / width).floor() as usize).min(bins - 1);
        buckets[index].count += 1;
    }

    buckets
}
