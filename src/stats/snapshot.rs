//! Stats Snapshot Module
//!
//! Aggregate figures computed from one full read of the item collection.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::store::Item;

// == Stats Snapshot ==
/// Immutable aggregate over the item collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of items
    pub total: usize,
    /// Mean price rounded to 2 decimals, 0 for an empty collection
    pub average_price: f64,
    /// When the snapshot was computed
    #[serde(serialize_with = "serialize_millis")]
    pub cached_at: DateTime<Utc>,
}

impl StatsSnapshot {
    // == Compute ==
    /// Computes a snapshot from `items`, stamped with the current time.
    pub fn compute(items: &[Item]) -> Self {
        Self::compute_at(items, Utc::now())
    }

    /// Computes a snapshot from `items` with an explicit timestamp.
    pub fn compute_at(items: &[Item], cached_at: DateTime<Utc>) -> Self {
        let total = items.len();
        let average_price = if total == 0 {
            0.0
        } else {
            let sum: f64 = items.iter().map(Item::effective_price).sum();
            round_cents(sum / total as f64)
        };

        Self {
            total,
            average_price,
            cached_at,
        }
    }
}

/// Rounds to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewItem;
    use chrono::TimeZone;

    fn priced(id: u64, price: Option<f64>) -> Item {
        let new_item = NewItem::named(format!("item{}", id));
        match price {
            Some(price) => new_item.with_price(price),
            None => new_item,
        }
        .into_item(id)
    }

    #[test]
    fn test_empty_collection() {
        let snapshot = StatsSnapshot::compute(&[]);
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.average_price, 0.0);
    }

    #[test]
    fn test_average_rounded_to_cents() {
        let items = vec![
            priced(1, Some(10.0)),
            priced(2, Some(20.0)),
            priced(3, Some(25.0)),
        ];
        let snapshot = StatsSnapshot::compute(&items);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.average_price, 18.33);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let items = vec![priced(1, Some(100.0)), priced(2, None)];
        let snapshot = StatsSnapshot::compute(&items);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.average_price, 50.0);
    }

    #[test]
    fn test_serialize_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let snapshot = StatsSnapshot::compute_at(&[priced(1, Some(4.5))], at);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["averagePrice"], 4.5);
        assert_eq!(json["cachedAt"], "2024-05-01T12:30:00.000Z");
    }
}
