use chrono::{Local, NaiveDate};

use stockroom_core::{DomainError, DomainResult, ProductId};

use crate::kind::ProductKind;
use crate::record::EXPIRY_DATE_FORMAT;

/// Electronics-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectronicsDetails {
    pub warranty_years: u32,
    pub brand: String,
}

/// Grocery-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryDetails {
    pub expiry_date: NaiveDate,
}

impl GroceryDetails {
    /// Strictly past its expiry date as of `today`; an item expiring today is still sellable.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }
}

/// Clothing-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingDetails {
    pub size: String,
    pub material: String,
}

/// Variant payload of a product. The variant is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetails {
    Electronics(ElectronicsDetails),
    Grocery(GroceryDetails),
    Clothing(ClothingDetails),
}

impl ProductDetails {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductDetails::Electronics(_) => ProductKind::Electronics,
            ProductDetails::Grocery(_) => ProductKind::Grocery,
            ProductDetails::Clothing(_) => ProductKind::Clothing,
        }
    }
}

/// A stocked product of one variant.
///
/// Invariants (held by every constructor and mutator):
/// - `price` is finite and strictly positive
/// - `quantity_in_stock` never goes below zero (enforced by the unsigned type
///   plus `sell` refusing to oversell)
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity_in_stock: u64,
    details: ProductDetails,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u64,
        details: ProductDetails,
    ) -> DomainResult<Self> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_argument("product ID cannot be empty"));
        }

        Ok(Self {
            id,
            name: name.into(),
            price: validate_price(price)?,
            quantity_in_stock,
            details,
        })
    }

    pub fn electronics(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u64,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Electronics(ElectronicsDetails {
                warranty_years,
                brand: brand.into(),
            }),
        )
    }

    pub fn grocery(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u64,
        expiry_date: NaiveDate,
    ) -> DomainResult<Self> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Grocery(GroceryDetails { expiry_date }),
        )
    }

    /// Grocery constructor taking the expiry date as `YYYY-MM-DD` text.
    pub fn grocery_from_str(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u64,
        expiry_date: &str,
    ) -> DomainResult<Self> {
        let expiry_date = parse_expiry_date(expiry_date)?;
        Self::grocery(id, name, price, quantity_in_stock, expiry_date)
    }

    pub fn clothing(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Clothing(ClothingDetails {
                size: size.into(),
                material: material.into(),
            }),
        )
    }

    pub fn product_id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity_in_stock(&self) -> u64 {
        self.quantity_in_stock
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn kind(&self) -> ProductKind {
        self.details.kind()
    }

    /// Expiry date for groceries; `None` for every other variant.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match &self.details {
            ProductDetails::Grocery(g) => Some(g.expiry_date),
            _ => None,
        }
    }

    /// Only groceries expire; other variants always report `false`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        match &self.details {
            ProductDetails::Grocery(g) => g.is_expired_on(today),
            _ => false,
        }
    }

    /// `is_expired_on` evaluated against the local calendar date at call time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(today())
    }

    /// Replace the price. Non-positive (or non-finite) prices are rejected and
    /// the current price is kept.
    pub fn set_price(&mut self, new_price: f64) -> DomainResult<()> {
        self.price = validate_price(new_price)?;
        Ok(())
    }

    pub fn restock(&mut self, amount: i64) -> DomainResult<()> {
        let amount = positive_amount(amount, "restock amount")?;
        self.quantity_in_stock = self
            .quantity_in_stock
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_argument("restock amount overflows stock level"))?;
        Ok(())
    }

    /// Remove `quantity` units from stock. On failure the stock is unchanged.
    pub fn sell(&mut self, quantity: i64) -> DomainResult<()> {
        let requested = positive_amount(quantity, "sale quantity")?;
        if requested > self.quantity_in_stock {
            return Err(DomainError::insufficient_stock(
                self.quantity_in_stock,
                requested,
            ));
        }
        self.quantity_in_stock -= requested;
        Ok(())
    }

    /// price × quantity on hand.
    pub fn total_value(&self) -> f64 {
        self.price * self.quantity_in_stock as f64
    }

    /// One-line summary as of `today` (which decides the grocery expiry marker).
    pub fn describe_as_of(&self, today: NaiveDate) -> String {
        let label = self.kind().label();
        match &self.details {
            ProductDetails::Electronics(e) => format!(
                "{label} - ID: {}, Name: {}, Brand: {}, Price: ${:.2}, Warranty: {} years, Stock: {}",
                self.id, self.name, e.brand, self.price, e.warranty_years, self.quantity_in_stock
            ),
            ProductDetails::Grocery(g) => {
                let expired = if g.is_expired_on(today) { " (EXPIRED)" } else { "" };
                format!(
                    "{label} - ID: {}, Name: {}, Price: ${:.2}, Expiry: {}{expired}, Stock: {}",
                    self.id,
                    self.name,
                    self.price,
                    g.expiry_date.format(EXPIRY_DATE_FORMAT),
                    self.quantity_in_stock
                )
            }
            ProductDetails::Clothing(c) => format!(
                "{label} - ID: {}, Name: {}, Size: {}, Material: {}, Price: ${:.2}, Stock: {}",
                self.id, self.name, c.size, c.material, self.price, self.quantity_in_stock
            ),
        }
    }

    pub fn describe(&self) -> String {
        self.describe_as_of(today())
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` expiry date. The input must be exactly the date;
/// surrounding whitespace is rejected.
pub fn parse_expiry_date(raw: &str) -> DomainResult<NaiveDate> {
    if raw.trim() != raw {
        return Err(DomainError::invalid_data(format!(
            "expiry_date {raw:?} has surrounding whitespace"
        )));
    }
    NaiveDate::parse_from_str(raw, EXPIRY_DATE_FORMAT).map_err(|e| {
        DomainError::invalid_data(format!(
            "expiry_date {raw:?} is not a YYYY-MM-DD date: {e}"
        ))
    })
}

fn validate_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::invalid_argument("price must be positive"));
    }
    Ok(price)
}

fn positive_amount(amount: i64, what: &str) -> DomainResult<u64> {
    if amount <= 0 {
        return Err(DomainError::invalid_argument(format!(
            "{what} must be positive"
        )));
    }
    Ok(amount as u64)
}
