//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: callers report it and carry on. File and
/// encoding failures are infrastructure concerns and live in the storage layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A non-positive amount, quantity or price was supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A sale asked for more units than are on hand.
    #[error("not enough stock. Available: {available}, Requested: {requested}")]
    InsufficientStock { available: u64, requested: u64 },

    /// No product is stored under the given identifier.
    #[error("product ID {0} not found")]
    NotFound(ProductId),

    /// A product with the same identifier is already stored.
    #[error("product ID {0} already exists")]
    DuplicateProduct(ProductId),

    /// A persisted record is incomplete, has an unknown type tag or a bad field.
    #[error("invalid product data: {0}")]
    InvalidProductData(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn insufficient_stock(available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn not_found(id: impl Into<ProductId>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn duplicate(id: impl Into<ProductId>) -> Self {
        Self::DuplicateProduct(id.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidProductData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_carries_both_amounts() {
        let err = DomainError::insufficient_stock(3, 5);
        assert_eq!(
            err.to_string(),
            "not enough stock. Available: 3, Requested: 5"
        );
    }

    #[test]
    fn lookup_errors_name_the_product() {
        assert_eq!(
            DomainError::not_found("E-1").to_string(),
            "product ID E-1 not found"
        );
        assert_eq!(
            DomainError::duplicate("E-1").to_string(),
            "product ID E-1 already exists"
        );
    }
}
