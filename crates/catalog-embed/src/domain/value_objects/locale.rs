//! DescriptionLocale - Language of the synthesized description labels

use serde::{Deserialize, Serialize};

/// Label phrases of the description template, in clause order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateLabels {
    pub product: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub segment: &'static str,
    pub features: &'static str,
    pub specs: &'static str,
    pub description: &'static str,
}

/// Language used for template labels and price segment wording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionLocale {
    #[default]
    En,
    /// Vietnamese, the catalog's native language
    Vi,
}

impl DescriptionLocale {
    pub fn labels(&self) -> TemplateLabels {
        match self {
            DescriptionLocale::En => TemplateLabels {
                product: "Product",
                brand: "Brand",
                category: "Category",
                segment: "Segment",
                features: "Features",
                specs: "Specs",
                description: "Description",
            },
            DescriptionLocale::Vi => TemplateLabels {
                product: "Sản phẩm",
                brand: "Thương hiệu",
                category: "Danh mục",
                segment: "Phân khúc",
                features: "Đặc điểm",
                specs: "Thông số",
                description: "Mô tả",
            },
        }
    }
}

impl std::fmt::Display for DescriptionLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptionLocale::En => write!(f, "en"),
            DescriptionLocale::Vi => write!(f, "vi"),
        }
    }
}

impl std::str::FromStr for DescriptionLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(DescriptionLocale::En),
            "vi" => Ok(DescriptionLocale::Vi),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}
