//! Persisted record form of a product.
//!
//! A record is a flat JSON object tagged by `type`:
//!
//! ```json
//! {
//!     "type": "grocery",
//!     "product_id": "G-1",
//!     "name": "Milk",
//!     "price": 1.5,
//!     "quantity_in_stock": 10,
//!     "expiry_date": "2024-03-10"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockroom_core::{DomainError, DomainResult};

use crate::kind::ProductKind;
use crate::product::{
    ClothingDetails, ElectronicsDetails, GroceryDetails, Product, ProductDetails,
    parse_expiry_date,
};

/// Calendar date format used for `expiry_date`.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductRecord {
    Electronics {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: u64,
        warranty_years: u32,
        brand: String,
    },
    Grocery {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: u64,
        expiry_date: String,
    },
    Clothing {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: u64,
        size: String,
        material: String,
    },
}

impl ProductRecord {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductRecord::Electronics { .. } => ProductKind::Electronics,
            ProductRecord::Grocery { .. } => ProductKind::Grocery,
            ProductRecord::Clothing { .. } => ProductKind::Clothing,
        }
    }

    /// Decode an untyped JSON object. Missing fields, wrong field types and
    /// unknown `type` tags all surface as `InvalidProductData`.
    pub fn from_json(value: JsonValue) -> DomainResult<Self> {
        let tag = value.get("type").cloned();
        serde_json::from_value(value).map_err(|e| match tag {
            Some(JsonValue::String(t)) if t.parse::<ProductKind>().is_err() => {
                DomainError::invalid_data(format!("unknown product type: {t}"))
            }
            _ => DomainError::invalid_data(e.to_string()),
        })
    }

    pub fn to_json(&self) -> JsonValue {
        // Every field is a string or a number; encoding into a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        let product_id = product.product_id().to_string();
        let name = product.name().to_string();
        let price = product.price();
        let quantity_in_stock = product.quantity_in_stock();

        match product.details() {
            ProductDetails::Electronics(e) => ProductRecord::Electronics {
                product_id,
                name,
                price,
                quantity_in_stock,
                warranty_years: e.warranty_years,
                brand: e.brand.clone(),
            },
            ProductDetails::Grocery(g) => ProductRecord::Grocery {
                product_id,
                name,
                price,
                quantity_in_stock,
                expiry_date: g.expiry_date.format(EXPIRY_DATE_FORMAT).to_string(),
            },
            ProductDetails::Clothing(c) => ProductRecord::Clothing {
                product_id,
                name,
                price,
                quantity_in_stock,
                size: c.size.clone(),
                material: c.material.clone(),
            },
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let (product_id, name, price, quantity_in_stock, details) = match record {
            ProductRecord::Electronics {
                product_id,
                name,
                price,
                quantity_in_stock,
                warranty_years,
                brand,
            } => (
                product_id,
                name,
                price,
                quantity_in_stock,
                ProductDetails::Electronics(ElectronicsDetails {
                    warranty_years,
                    brand,
                }),
            ),
            ProductRecord::Grocery {
                product_id,
                name,
                price,
                quantity_in_stock,
                expiry_date,
            } => (
                product_id,
                name,
                price,
                quantity_in_stock,
                ProductDetails::Grocery(GroceryDetails {
                    expiry_date: parse_expiry_date(&expiry_date)?,
                }),
            ),
            ProductRecord::Clothing {
                product_id,
                name,
                price,
                quantity_in_stock,
                size,
                material,
            } => (
                product_id,
                name,
                price,
                quantity_in_stock,
                ProductDetails::Clothing(ClothingDetails { size, material }),
            ),
        };

        // Constructor validation failures are data errors when they come from a record.
        Product::new(product_id.clone(), name, price, quantity_in_stock, details).map_err(|e| {
            match e {
                DomainError::InvalidArgument(msg) => {
                    DomainError::invalid_data(format!("product {product_id:?}: {msg}"))
                }
                other => other,
            }
        })
    }
}

impl Product {
    /// Structured record for persistence.
    pub fn serialize(&self) -> ProductRecord {
        ProductRecord::from(self)
    }

    /// Rebuild a product from a persisted JSON record.
    pub fn deserialize(value: JsonValue) -> DomainResult<Product> {
        ProductRecord::from_json(value)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn milk() -> Product {
        Product::grocery(
            "G-1",
            "Milk",
            1.5,
            10,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn serialized_record_is_tagged_and_flat() {
        let value = milk().serialize().to_json();
        assert_eq!(
            value,
            json!({
                "type": "grocery",
                "product_id": "G-1",
                "name": "Milk",
                "price": 1.5,
                "quantity_in_stock": 10,
                "expiry_date": "2024-03-10"
            })
        );
    }

    #[test]
    fn deserialize_restores_every_variant() {
        let products = vec![
            Product::electronics("E-1", "TV", 499.0, 2, 3, "Acme").unwrap(),
            milk(),
            Product::clothing("C-1", "Scarf", 12.25, 7, "One size", "Silk").unwrap(),
        ];
        for p in products {
            let restored = Product::deserialize(p.serialize().to_json()).unwrap();
            assert_eq!(restored, p);
        }
    }

    #[test]
    fn missing_field_is_invalid_product_data() {
        let err = Product::deserialize(json!({
            "type": "electronics",
            "product_id": "E-1",
            "name": "TV",
            "price": 499.0,
            "quantity_in_stock": 2,
            "warranty_years": 3
        }))
        .unwrap_err();
        match err {
            DomainError::InvalidProductData(msg) => assert!(msg.contains("brand"), "{msg}"),
            other => panic!("Expected InvalidProductData, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_invalid_product_data() {
        let err = Product::deserialize(json!({
            "type": "furniture",
            "product_id": "F-1",
            "name": "Chair",
            "price": 40.0,
            "quantity_in_stock": 1
        }))
        .unwrap_err();
        assert_eq!(err, DomainError::invalid_data("unknown product type: furniture"));
    }

    #[test]
    fn missing_type_is_invalid_product_data() {
        let err = Product::deserialize(json!({ "product_id": "X" })).unwrap_err();
        assert!(matches!(err, DomainError::InvalidProductData(_)));
    }

    #[test]
    fn bad_expiry_date_is_invalid_product_data() {
        let err = Product::deserialize(json!({
            "type": "grocery",
            "product_id": "G-1",
            "name": "Milk",
            "price": 1.5,
            "quantity_in_stock": 10,
            "expiry_date": "next tuesday"
        }))
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidProductData(_)));
    }

    #[test]
    fn records_violating_invariants_are_rejected() {
        let zero_price = json!({
            "type": "clothing",
            "product_id": "C-1",
            "name": "Hat",
            "price": 0.0,
            "quantity_in_stock": 1,
            "size": "M",
            "material": "Felt"
        });
        let err = Product::deserialize(zero_price).unwrap_err();
        assert!(matches!(err, DomainError::InvalidProductData(_)));

        let negative_stock = json!({
            "type": "clothing",
            "product_id": "C-1",
            "name": "Hat",
            "price": 3.0,
            "quantity_in_stock": -1,
            "size": "M",
            "material": "Felt"
        });
        let err = Product::deserialize(negative_stock).unwrap_err();
        assert!(matches!(err, DomainError::InvalidProductData(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            let common = (
                "[A-Z]{1,3}-[0-9]{1,4}",
                "[A-Za-z][A-Za-z0-9 ]{0,30}",
                0.01f64..100_000.0,
                0u64..1_000_000,
            );
            prop_oneof![
                (common.clone(), 0u32..10, "[A-Za-z]{1,12}").prop_map(
                    |((id, name, price, qty), warranty, brand)| {
                        Product::electronics(id, name, price, qty, warranty, brand).unwrap()
                    }
                ),
                (common.clone(), 0i64..20_000).prop_map(|((id, name, price, qty), days)| {
                    let expiry = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
                        + chrono::Duration::days(days);
                    Product::grocery(id, name, price, qty, expiry).unwrap()
                }),
                (common, "XS|S|M|L|XL", "[A-Za-z]{1,12}").prop_map(
                    |((id, name, price, qty), size, material)| {
                        Product::clothing(id, name, price, qty, size, material).unwrap()
                    }
                ),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: deserialize(serialize(p)) == p for every variant.
            #[test]
            fn record_round_trip_preserves_every_field(p in arb_product()) {
                let restored = Product::deserialize(p.serialize().to_json()).unwrap();
                prop_assert_eq!(restored, p);
            }
        }
    }
}
