//! Field Normalizer
//!
//! Turns a raw product row into plain strings safe for string composition.
//! Each field is either present and well typed, present but malformed, or
//! absent; the last two collapse to an empty string. Nothing here fails.

use serde_json::{Map, Value};

use crate::domain::{ProductRecord, SellerJoin};

const LIST_SEPARATOR: &str = ", ";

/// Normalized product fields ready for the description template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub tags: String,
    pub specs: String,
    pub description: String,
}

impl NormalizedProduct {
    pub fn from_record(record: &ProductRecord, join: &SellerJoin) -> Self {
        Self {
            name: text_field(record.name.as_ref()),
            brand: seller_name(record.seller(join), &join.name_column),
            category: text_field(record.category.as_ref()),
            tags: tag_list(record.tags.as_ref()),
            specs: specification(record.specification.as_ref()),
            description: text_field(record.description.as_ref()),
        }
    }
}

/// Scalar text: strings verbatim, numbers and booleans as plain text
pub fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Shop name from the joined seller, only when the join is a mapping
pub fn seller_name(seller: Option<&Value>, name_column: &str) -> String {
    match seller {
        Some(Value::Object(map)) => text_field(map.get(name_column)),
        // To-one embeds can come back as a single-element array
        Some(Value::Array(items)) if items.len() == 1 => match &items[0] {
            Value::Object(map) => text_field(map.get(name_column)),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Tags joined with ", "; null and nested elements are skipped
pub fn tag_list(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                    Some(text_field(Some(item)))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        _ => String::new(),
    }
}

/// `key: value` pairs in the order the store sent them.
///
/// String values appear verbatim. Any other value is written as its JSON
/// text, so `true` and `null` stay lowercase and nested values stay compact.
pub fn specification(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(map)) => render_pairs(map),
        _ => String::new(),
    }
}

fn render_pairs(map: &Map<String, Value>) -> String {
    map.iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
