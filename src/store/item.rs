//! Item Module
//!
//! The catalog record and the payload used to create one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// == Item ==
/// A single catalog entry as persisted in the collection file.
///
/// Fields other than the known ones are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier assigned by the store
    pub id: u64,
    /// Display name
    pub name: String,
    /// Optional category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional price, kept as the JSON number it was written as; counted
    /// as 0 in aggregates when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    /// Any other fields present in the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    // == Matches ==
    /// Returns true if `name` or `category` contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }

    // == Effective Price ==
    /// Price used for aggregation.
    pub fn effective_price(&self) -> f64 {
        self.price.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }
}

// == New Item ==
/// An item that has not been assigned an id yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItem {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Optional category label
    #[serde(default)]
    pub category: Option<String>,
    /// Optional price
    #[serde(default)]
    pub price: Option<Number>,
    /// Any other fields supplied by the client
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewItem {
    /// Creates a NewItem with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the price. Non-finite values leave it unset.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Number::from_f64(price);
        self
    }

    /// Validates the payload
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if let Some(price) = self.price.as_ref().and_then(Number::as_f64) {
            if price < 0.0 {
                return Some("Price must be a non-negative number".to_string());
            }
        }
        None
    }

    // == Into Item ==
    /// Attaches the assigned id. A client-supplied `id` field is discarded.
    pub fn into_item(mut self, id: u64) -> Item {
        self.extra.remove("id");
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: Option<&str>) -> Item {
        Item {
            id: 1,
            name: name.to_string(),
            category: category.map(str::to_string),
            price: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_item_deserialize_minimal() {
        let json = r#"{"id": 7, "name": "Desk"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Desk");
        assert!(item.category.is_none());
        assert_eq!(item.effective_price(), 0.0);
    }

    #[test]
    fn test_item_keeps_unknown_fields() {
        let json = r#"{"id": 1, "name": "Lamp", "price": 20.5, "stock": 3}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.extra.get("stock"), Some(&Value::from(3)));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["stock"], 3);
        assert_eq!(out["price"], 20.5);
        assert!(out.get("category").is_none());
    }

    #[test]
    fn test_integer_price_stays_integer() {
        let json = r#"{"id":1,"name":"Laptop","price":2499}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.effective_price(), 2499.0);
        assert_eq!(serde_json::to_string(&item).unwrap(), json);
    }

    #[test]
    fn test_matches_name_and_category_case_insensitive() {
        assert!(item("red shoes", None).matches("red"));
        assert!(item("Boots", Some("Red")).matches("red"));
        assert!(!item("Boots", Some("Footwear")).matches("red"));
    }

    #[test]
    fn test_validate_empty_name() {
        assert!(NewItem::named("   ").validate().is_some());
        assert!(NewItem::named("Chair").validate().is_none());
    }

    #[test]
    fn test_validate_negative_price() {
        let new_item = NewItem::named("Chair").with_price(-1.0);
        assert!(new_item.validate().is_some());
    }

    #[test]
    fn test_into_item_discards_client_id() {
        let json = r#"{"id": 42, "name": "Sofa", "color": "blue"}"#;
        let new_item: NewItem = serde_json::from_str(json).unwrap();
        let item = new_item.into_item(5);

        assert_eq!(item.id, 5);
        assert!(!item.extra.contains_key("id"));
        assert_eq!(item.extra.get("color"), Some(&Value::from("blue")));
    }
}
