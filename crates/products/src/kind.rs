use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

/// Product variant discriminant.
///
/// The string form doubles as the `type` tag of persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Electronics,
    Grocery,
    Clothing,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [
        ProductKind::Electronics,
        ProductKind::Grocery,
        ProductKind::Clothing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Electronics => "electronics",
            ProductKind::Grocery => "grocery",
            ProductKind::Clothing => "clothing",
        }
    }

    /// Human-facing label used in product descriptions.
    pub fn label(self) -> &'static str {
        match self {
            ProductKind::Electronics => "Electronics",
            ProductKind::Grocery => "Grocery",
            ProductKind::Clothing => "Clothing",
        }
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electronics" => Ok(ProductKind::Electronics),
            "grocery" => Ok(ProductKind::Grocery),
            "clothing" => Ok(ProductKind::Clothing),
            other => Err(DomainError::invalid_data(format!(
                "unknown product type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Grocery".parse::<ProductKind>().unwrap(), ProductKind::Grocery);
        assert_eq!(" CLOTHING ".parse::<ProductKind>().unwrap(), ProductKind::Clothing);
    }

    #[test]
    fn unknown_tag_is_invalid_product_data() {
        let err = "furniture".parse::<ProductKind>().unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_data("unknown product type: furniture")
        );
    }

    #[test]
    fn display_matches_serde_tag() {
        for kind in ProductKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
