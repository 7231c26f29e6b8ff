use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::{DateTime, Utc};
use emporium_catalog::Product;
use emporium_shared::{Money, OrderId, ProductId};
use crate::error::{OrderError, OrderResult};

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
            OrderStatus::Completed => f.write_str("completed"),
        }
    }
}

/// A customer's cart.
///
/// Lines are cart line copies of global products, kept in the order they were
/// first added. Once completed the order no longer accepts changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    pub(crate) lines: Vec<Product>,
    pub(crate) status: OrderStatus,
    created_date: DateTime<Utc>,
    pub(crate) checkout_date: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            id: OrderId::generate(),
            customer_name: customer_name.into(),
            lines: Vec::new(),
            status: OrderStatus::Pending,
            created_date: Utc::now(),
            checkout_date: None,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn lines(&self) -> &[Product] {
        &self.lines
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    pub fn checkout_date(&self) -> Option<DateTime<Utc>> {
        self.checkout_date
    }

    /// Sum of price times quantity over all lines
    pub fn total(&self) -> Money {
        self.lines.iter().map(Product::subtotal).sum()
    }

    /// Units of a global product currently in the cart (0 if absent)
    pub fn line_quantity(&self, parent_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.parent_id() == Some(*parent_id))
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity()))
    }

    /// The line whose own id or parent id is `product_id`
    pub fn line(&self, product_id: &ProductId) -> Option<&Product> {
        self.position(product_id).map(|idx| &self.lines[idx])
    }

    pub(crate) fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.id() == *product_id || line.parent_id() == Some(*product_id))
    }

    /// `Closed` unless the order is still pending
    pub fn ensure_pending(&self) -> OrderResult<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(OrderError::Closed(self.id))
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {}: {}, {}, {}",
            self.id,
            self.total(),
            self.status,
            self.created_date.format("%Y-%m-%d")
        )
    }
}
