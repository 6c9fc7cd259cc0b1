//! Product records and the field rules every write must satisfy.
//!
//! Raw form input ([`ProductInput`], [`ProductPatch`]) carries numbers as
//! [`Decimal`] so that values like `1.5` stock or `10.005` price can be
//! represented and rejected. Validation turns them into [`NewProduct`] and
//! [`ProductChanges`], the only shapes a [`RecordStore`](crate::store::RecordStore)
//! accepts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of fractional digits a price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [Self::Draft, Self::Active, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status '{}' (expected draft, active or archived)", s))
    }
}

/// A catalogue record as owned by the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
    pub status: ProductStatus,
    pub published_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Build a freshly created record: always a draft, never published.
    pub fn new(id: impl Into<String>, fields: NewProduct) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            status: ProductStatus::Draft,
            published_at: None,
        }
    }

    /// Apply validated changes in place.
    ///
    /// `published_at` is stamped with `now` when the status moves to
    /// `active` and the record was never published, and cleared whenever
    /// the status moves to `draft`. Any other change leaves it alone.
    pub fn apply(&mut self, changes: ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        match changes.status {
            Some(ProductStatus::Active) if self.published_at.is_none() => {
                self.published_at = Some(now);
            }
            Some(ProductStatus::Draft) => self.published_at = None,
            _ => {}
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

/// A rejected field value. Raised before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty or whitespace")]
    EmptyName,

    #[error("price must be greater than 0 (got {0})")]
    NonPositivePrice(Decimal),

    #[error("price may have at most 2 decimal places (got {0})")]
    PriceTooPrecise(Decimal),

    #[error("stock must not be negative (got {0})")]
    NegativeStock(Decimal),

    #[error("stock must be a whole number (got {0})")]
    FractionalStock(Decimal),

    #[error("stock is out of range (got {0})")]
    StockOutOfRange(Decimal),
}

impl ValidationError {
    /// Name of the offending field, as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NonPositivePrice(_) | Self::PriceTooPrecise(_) => "price",
            Self::NegativeStock(_) | Self::FractionalStock(_) | Self::StockOutOfRange(_) => "stock",
        }
    }
}

/// Trims the name and rejects it when nothing is left.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Accepts strictly positive prices with at most two significant decimals.
///
/// Trailing zeros do not count: `10.50` is the same price as `10.5`.
pub fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(price));
    }
    let normalized = price.normalize();
    if normalized.scale() > PRICE_SCALE {
        return Err(ValidationError::PriceTooPrecise(price));
    }
    Ok(normalized)
}

/// Accepts non-negative whole numbers.
pub fn validate_stock(stock: Decimal) -> Result<u64, ValidationError> {
    if stock < Decimal::ZERO {
        return Err(ValidationError::NegativeStock(stock));
    }
    if !stock.fract().is_zero() {
        return Err(ValidationError::FractionalStock(stock));
    }
    stock
        .to_u64()
        .ok_or(ValidationError::StockOutOfRange(stock))
}

/// Unvalidated create form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub stock: Decimal,
}

impl ProductInput {
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        Ok(NewProduct {
            name: validate_name(&self.name)?,
            price: validate_price(self.price)?,
            stock: validate_stock(self.stock)?,
        })
    }
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
}

/// Unvalidated partial edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

impl ProductPatch {
    pub fn status(status: ProductStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ProductChanges, ValidationError> {
        Ok(ProductChanges {
            name: self.name.as_deref().map(validate_name).transpose()?,
            price: self.price.map(validate_price).transpose()?,
            stock: self.stock.map(validate_stock).transpose()?,
            status: self.status,
        })
    }
}

/// Validated partial edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn draft() -> Product {
        Product::new(
            "p1",
            NewProduct {
                name: "Desk Lamp".into(),
                price: dec("19.99"),
                stock: 4,
            },
        )
    }

    #[test]
    fn price_precision_rules() {
        assert_eq!(
            validate_price(dec("10.005")),
            Err(ValidationError::PriceTooPrecise(dec("10.005")))
        );
        assert_eq!(validate_price(dec("10.5")), Ok(dec("10.5")));
        assert_eq!(validate_price(dec("10")), Ok(dec("10")));
        assert_eq!(validate_price(dec("10.500")), Ok(dec("10.5")));
        assert!(matches!(
            validate_price(Decimal::ZERO),
            Err(ValidationError::NonPositivePrice(_))
        ));
        assert!(matches!(
            validate_price(dec("-3")),
            Err(ValidationError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn stock_rules() {
        assert_eq!(
            validate_stock(dec("-1")),
            Err(ValidationError::NegativeStock(dec("-1")))
        );
        assert_eq!(
            validate_stock(dec("1.5")),
            Err(ValidationError::FractionalStock(dec("1.5")))
        );
        assert_eq!(validate_stock(dec("0")), Ok(0));
        assert_eq!(validate_stock(dec("12.0")), Ok(12));
    }

    #[test]
    fn name_is_trimmed_before_emptiness_check() {
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("  Lamp "), Ok("Lamp".to_string()));
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let patch = ProductPatch {
            stock: Some(dec("2.5")),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate().unwrap_err().field(), "stock");
        assert_eq!(ProductPatch::default().validate(), Ok(ProductChanges::default()));
    }

    #[test]
    fn activating_a_draft_stamps_published_at() {
        let now = Utc::now();
        let mut product = draft();
        product.apply(ProductPatch::status(ProductStatus::Active).validate().unwrap(), now);
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(product.published_at, Some(now));
    }

    #[test]
    fn reactivating_keeps_original_timestamp() {
        let first = Utc::now();
        let mut product = draft();
        let activate = ProductPatch::status(ProductStatus::Active).validate().unwrap();
        product.apply(activate.clone(), first);
        product.apply(activate, first + Duration::hours(1));
        assert_eq!(product.published_at, Some(first));
    }

    #[test]
    fn returning_to_draft_clears_published_at() {
        let mut product = draft();
        product.apply(
            ProductPatch::status(ProductStatus::Active).validate().unwrap(),
            Utc::now(),
        );
        product.apply(
            ProductPatch::status(ProductStatus::Draft).validate().unwrap(),
            Utc::now(),
        );
        assert_eq!(product.published_at, None);
    }

    #[test]
    fn archiving_leaves_published_at_untouched() {
        let mut product = draft();
        product.apply(
            ProductPatch::status(ProductStatus::Archived).validate().unwrap(),
            Utc::now(),
        );
        assert_eq!(product.published_at, None);
        assert_eq!(product.status, ProductStatus::Archived);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Active".parse::<ProductStatus>(), Ok(ProductStatus::Active));
        assert!("live".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn product_serializes_camel_case_with_null_published_at() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json["publishedAt"], serde_json::Value::Null);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["price"], serde_json::json!(19.99));
    }
}
