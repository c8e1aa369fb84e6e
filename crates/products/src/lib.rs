//! Products domain module.
//!
//! This crate contains the product variant model (electronics, groceries,
//! clothing) and its persisted record form, implemented purely as
//! deterministic domain logic (no IO, no storage).

pub mod kind;
pub mod product;
pub mod record;

pub use kind::ProductKind;
pub use product::{
    ClothingDetails, ElectronicsDetails, GroceryDetails, Product, ProductDetails,
    parse_expiry_date, today,
};
pub use record::{EXPIRY_DATE_FORMAT, ProductRecord};
