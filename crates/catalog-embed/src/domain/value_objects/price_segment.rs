//! PriceSegment - Coarse price tier fed into the product description

use serde_json::Value;

use super::DescriptionLocale;

/// Upper bound (exclusive) of the budget tier
pub const BUDGET_CEILING: f64 = 200_000.0;
/// Upper bound (exclusive) of the mid-range tier
pub const MID_RANGE_CEILING: f64 = 1_000_000.0;

/// Price tier derived from a product's price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceSegment {
    Budget,
    MidRange,
    Premium,
    /// Price absent or not numeric
    #[default]
    Unknown,
}

impl PriceSegment {
    /// Derive the tier from a raw price value. Never fails.
    pub fn from_price(price: Option<&Value>) -> Self {
        match price.and_then(coerce_price) {
            Some(amount) => Self::from_amount(amount),
            None => PriceSegment::Unknown,
        }
    }

    pub fn from_amount(amount: f64) -> Self {
        if amount.is_nan() {
            PriceSegment::Unknown
        } else if amount < BUDGET_CEILING {
            PriceSegment::Budget
        } else if amount < MID_RANGE_CEILING {
            PriceSegment::MidRange
        } else {
            PriceSegment::Premium
        }
    }

    /// English label; empty for `Unknown`
    pub fn label(&self) -> &'static str {
        self.label_in(DescriptionLocale::En)
    }

    pub fn label_in(&self, locale: DescriptionLocale) -> &'static str {
        match (self, locale) {
            (PriceSegment::Unknown, _) => "",
            (PriceSegment::Budget, DescriptionLocale::En) => "budget/economical",
            (PriceSegment::MidRange, DescriptionLocale::En) => "mid-range/mainstream",
            (PriceSegment::Premium, DescriptionLocale::En) => "premium/luxury",
            (PriceSegment::Budget, DescriptionLocale::Vi) => "giá rẻ bình dân tiết kiệm",
            (PriceSegment::MidRange, DescriptionLocale::Vi) => "tầm trung phổ thông",
            (PriceSegment::Premium, DescriptionLocale::Vi) => "cao cấp sang trọng hàng hiệu",
        }
    }
}

fn coerce_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
