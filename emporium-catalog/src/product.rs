use serde::{Deserialize, Serialize};
use std::fmt;
use emporium_shared::text::title_case;
use emporium_shared::{Money, ProductId};
use crate::{CatalogError, CatalogResult};

/// Input record for registering a product in the global inventory.
///
/// This is the shape catalog bootstrap data arrives in, whether built in code
/// or deserialized from configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }
}

/// A catalog item.
///
/// A product without a `parent_id` is a global inventory record. A product
/// with a `parent_id` is a cart line copy holding the quantity a customer has
/// put in an order; its parent is the global record it was copied from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    parent_id: Option<ProductId>,
    name: String,
    category: String,
    price: Money,
    quantity: u32,
}

impl Product {
    /// Build a validated global inventory record with a fresh id
    pub(crate) fn new_global(name: &str, category: &str, price: f64, quantity: i64) -> CatalogResult<Self> {
        Ok(Self {
            id: ProductId::generate(),
            parent_id: None,
            name: normalize_label(name, "name")?,
            category: normalize_label(category, "category")?,
            price: validate_price(price)?,
            quantity: validate_quantity(quantity)?,
        })
    }

    /// Copy this record into a cart line holding `quantity` units
    pub(crate) fn cart_line(&self, quantity: u32) -> Self {
        Self {
            id: ProductId::generate(),
            parent_id: Some(self.lineage()),
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            quantity,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn parent_id(&self) -> Option<ProductId> {
        self.parent_id
    }

    /// The global record this product descends from (itself for global records)
    pub fn lineage(&self) -> ProductId {
        self.parent_id.unwrap_or(self.id)
    }

    pub fn is_cart_line(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price multiplied by quantity
    pub fn subtotal(&self) -> Money {
        self.price.times(self.quantity)
    }

    pub fn set_price(&mut self, price: f64) -> CatalogResult<()> {
        self.price = validate_price(price)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> CatalogResult<()> {
        self.quantity = validate_quantity(quantity)?;
        Ok(())
    }

    pub(crate) fn set_stock(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Two products share an identity when they descend from the same global record.
    pub fn same_identity(&self, other: &Product) -> bool {
        self.lineage() == other.lineage()
    }

    /// Identity and quantity both match. Price and category are not compared.
    pub fn same_identity_and_quantity(&self, other: &Product) -> bool {
        self.same_identity(other) && self.quantity == other.quantity
    }

    /// Returns a copy of `self` holding the sum of both quantities.
    ///
    /// # Errors
    /// `LineageMismatch` if `other` is a different item.
    pub fn combined_with(&self, other: &Product) -> CatalogResult<Product> {
        self.check_lineage(other)?;
        let quantity = self.quantity.checked_add(other.quantity).ok_or_else(|| {
            CatalogError::Validation(format!("quantity overflow combining {} units of {}", other.quantity, self.name))
        })?;

        let mut combined = self.clone();
        combined.quantity = quantity;
        Ok(combined)
    }

    /// Returns a copy of `self` with `other`'s quantity removed.
    ///
    /// # Errors
    /// `LineageMismatch` if `other` is a different item, `InsufficientStock`
    /// if `other` holds more units than `self`.
    pub fn reduced_by(&self, other: &Product) -> CatalogResult<Product> {
        self.check_lineage(other)?;
        if other.quantity > self.quantity {
            return Err(CatalogError::InsufficientStock {
                product_id: self.lineage(),
                requested: u64::from(other.quantity),
                available: self.quantity,
            });
        }

        let mut reduced = self.clone();
        reduced.quantity -= other.quantity;
        Ok(reduced)
    }

    fn check_lineage(&self, other: &Product) -> CatalogResult<()> {
        if self.same_identity(other) {
            Ok(())
        } else {
            Err(CatalogError::LineageMismatch {
                left: self.lineage(),
                right: other.lineage(),
            })
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}, {}pcs", self.name, self.price, self.quantity)
    }
}

/// Trim and title-case a name or category, rejecting blanks
fn normalize_label(value: &str, field: &str) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(format!("missing product {}", field)));
    }

    Ok(title_case(trimmed))
}

fn validate_price(price: f64) -> CatalogResult<Money> {
    let money = Money::from_major(price)
        .ok_or_else(|| CatalogError::Validation(format!("invalid product price: {}", price)))?;
    if money.is_negative() {
        return Err(CatalogError::Validation(format!("product price cannot be negative: {}", price)));
    }
    Ok(money)
}

fn validate_quantity(quantity: i64) -> CatalogResult<u32> {
    u32::try_from(quantity)
        .map_err(|_| CatalogError::Validation(format!("invalid product quantity: {}", quantity)))
}
