//! Product - Catalog row as read from the data store
//!
//! Optional fields are kept as raw JSON so malformed values survive decoding
//! and are resolved later by the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::DomainError;

/// Product row with its joined seller reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub specification: Option<Value>,
    /// Embedded relations, keyed by relation name (e.g. `users`)
    #[serde(flatten)]
    pub joined: Map<String, Value>,
}

impl ProductRecord {
    /// Raw seller reference for the given join, if the store returned one
    pub fn seller(&self, join: &SellerJoin) -> Option<&Value> {
        self.joined.get(&join.relation).filter(|v| !v.is_null())
    }

    /// Resolve the identifier used to target the update
    pub fn product_id(&self) -> Result<ProductId, DomainError> {
        ProductId::from_value(self.id.as_ref())
    }
}

/// Shape of the foreign relationship that exposes the seller's shop name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerJoin {
    pub relation: String,
    pub name_column: String,
}

impl SellerJoin {
    pub fn new(relation: impl Into<String>, name_column: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            name_column: name_column.into(),
        }
    }

    /// PostgREST embedded-resource select fragment, e.g. `users(shop_name)`
    pub fn select_fragment(&self) -> String {
        format!("{}({})", self.relation, self.name_column)
    }
}

impl Default for SellerJoin {
    fn default() -> Self {
        Self::new("users", "shop_name")
    }
}

/// Record identifier (integer or text primary key)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl ProductId {
    pub fn from_value(value: Option<&Value>) -> Result<Self, DomainError> {
        match value {
            None | Some(Value::Null) => {
                Err(DomainError::InvalidRecord("missing product id".to_string()))
            }
            Some(Value::Number(n)) => n.as_i64().map(ProductId::Int).ok_or_else(|| {
                DomainError::InvalidRecord(format!("product id {} is not an integer", n))
            }),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(ProductId::Text(s.clone())),
            Some(other) => Err(DomainError::InvalidRecord(format!(
                "malformed product id: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{}", id),
            ProductId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_joined_seller() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 7,
            "name": "Widget",
            "price": null,
            "users": {"shop_name": "ShopX"}
        }))
        .unwrap();

        assert_eq!(record.product_id().unwrap(), ProductId::Int(7));
        assert_eq!(record.price, None);
        assert_eq!(record.tags, None);
        assert_eq!(
            record.seller(&SellerJoin::default()),
            Some(&json!({"shop_name": "ShopX"}))
        );
    }

    #[test]
    fn test_null_seller_is_absent() {
        let record: ProductRecord =
            serde_json::from_value(json!({"id": 1, "users": null})).unwrap();
        assert!(record.seller(&SellerJoin::default()).is_none());
    }

    #[test]
    fn test_product_id_variants() {
        assert_eq!(
            ProductId::from_value(Some(&json!("a1b2"))).unwrap(),
            ProductId::Text("a1b2".to_string())
        );
        assert!(ProductId::from_value(None).is_err());
        assert!(ProductId::from_value(Some(&json!(1.5))).is_err());
        assert!(ProductId::from_value(Some(&json!(""))).is_err());
        assert!(ProductId::from_value(Some(&json!({"id": 1}))).is_err());
    }

    #[test]
    fn test_select_fragment() {
        assert_eq!(SellerJoin::default().select_fragment(), "users(shop_name)");
    }
}
