//! Description Synthesizer
//!
//! Composes normalized fields into the text handed to the embedding model.
//! Clause order is fixed and every label is emitted even when its content is
//! empty, so every product yields the same sentence skeleton.

use crate::domain::{DescriptionLocale, NormalizedProduct, PriceSegment};

#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionSynthesizer {
    locale: DescriptionLocale,
}

impl DescriptionSynthesizer {
    pub fn new(locale: DescriptionLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> DescriptionLocale {
        self.locale
    }

    pub fn synthesize(&self, product: &NormalizedProduct, segment: PriceSegment) -> String {
        let labels = self.locale.labels();
        format!(
            "{}: {}. {}: {}. {}: {}. {}: {}. {}: {}. {}: {}. {}: {}",
            labels.product,
            product.name,
            labels.brand,
            product.brand,
            labels.category,
            product.category,
            labels.segment,
            segment.label_in(self.locale),
            labels.features,
            product.tags,
            labels.specs,
            product.specs,
            labels.description,
            product.description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductRecord, SellerJoin};
    use serde_json::json;

    fn widget() -> ProductRecord {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Widget",
            "description": "A widget.",
            "category": "Tools",
            "price": 500000,
            "tags": ["durable"],
            "specification": {"weight": "1kg"},
            "users": {"shop_name": "ShopX"}
        }))
        .unwrap()
    }

    fn describe(record: &ProductRecord, synthesizer: DescriptionSynthesizer) -> String {
        let normalized = NormalizedProduct::from_record(record, &SellerJoin::default());
        synthesizer.synthesize(&normalized, PriceSegment::from_price(record.price.as_ref()))
    }

    #[test]
    fn test_full_record() {
        let text = describe(&widget(), DescriptionSynthesizer::default());
        assert_eq!(
            text,
            "Product: Widget. Brand: ShopX. Category: Tools. Segment: mid-range/mainstream. \
             Features: durable. Specs: weight: 1kg. Description: A widget."
        );
    }

    #[test]
    fn test_fields_appear_in_template_order() {
        let text = describe(&widget(), DescriptionSynthesizer::default());
        let expected = [
            "Widget",
            "ShopX",
            "Tools",
            "mid-range/mainstream",
            "durable",
            "weight: 1kg",
            "A widget.",
        ];

        let mut cursor = 0;
        for fragment in expected {
            let found = text[cursor..]
                .find(fragment)
                .unwrap_or_else(|| panic!("{fragment:?} missing or out of order in {text:?}"));
            cursor += found + fragment.len();
        }
    }

    #[test]
    fn test_empty_record_keeps_every_label() {
        let record = ProductRecord {
            id: Some(json!(1)),
            ..Default::default()
        };
        let text = describe(&record, DescriptionSynthesizer::default());
        assert_eq!(
            text,
            "Product: . Brand: . Category: . Segment: . Features: . Specs: . Description: "
        );
    }

    #[test]
    fn test_same_record_same_text() {
        let synthesizer = DescriptionSynthesizer::default();
        assert_eq!(
            describe(&widget(), synthesizer),
            describe(&widget(), synthesizer)
        );
    }

    #[test]
    fn test_locale_defaults_to_english() {
        assert_eq!(DescriptionSynthesizer::default().locale(), DescriptionLocale::En);
        assert_eq!(
            DescriptionSynthesizer::new(DescriptionLocale::Vi).locale(),
            DescriptionLocale::Vi
        );
    }

    #[test]
    fn test_vietnamese_template() {
        let text = describe(&widget(), DescriptionSynthesizer::new(DescriptionLocale::Vi));
        assert_eq!(
            text,
            "Sản phẩm: Widget. Thương hiệu: ShopX. Danh mục: Tools. Phân khúc: tầm trung phổ thông. \
             Đặc điểm: durable. Thông số: weight: 1kg. Mô tả: A widget."
        );
    }
}
