//! Tabular renderings of the catalog and of a cart.
//!
//! Views are plain serializable rows; `Display` lays them out as aligned text
//! tables for a console.

use serde::Serialize;
use std::fmt;
use chrono::{DateTime, Utc};
use emporium_catalog::Product;
use emporium_order::{Order, OrderStatus};
use emporium_shared::{Money, OrderId, ProductId};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
}

impl From<&Product> for CatalogRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            category: product.category().to_string(),
            price: product.price(),
            quantity: product.quantity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CatalogView {
    pub rows: Vec<CatalogRow>,
}

impl CatalogView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> FromIterator<&'a Product> for CatalogView {
    fn from_iter<I: IntoIterator<Item = &'a Product>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(CatalogRow::from).collect(),
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No products found");
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.name.clone(),
                    row.category.clone(),
                    row.price.to_string(),
                    row.quantity.to_string(),
                ]
            })
            .collect::<Vec<_>>();

        write_table(f, &CATALOG_COLUMNS, &rows)
    }
}

/// A cart line. `id` is the global product id, which cart operations accept.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
    pub subtotal: Money,
}

impl From<&Product> for CartRow {
    fn from(line: &Product) -> Self {
        Self {
            id: line.lineage(),
            name: line.name().to_string(),
            category: line.category().to_string(),
            price: line.price(),
            quantity: line.quantity(),
            subtotal: line.subtotal(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub customer: String,
    pub order_id: Option<OrderId>,
    pub status: Option<OrderStatus>,
    pub created_date: Option<DateTime<Utc>>,
    pub checkout_date: Option<DateTime<Utc>>,
    pub rows: Vec<CartRow>,
    pub total: Money,
}

impl CartView {
    pub fn new(customer: &str, order: Option<&Order>) -> Self {
        Self {
            customer: customer.to_string(),
            order_id: order.map(Order::id),
            status: order.map(Order::status),
            created_date: order.map(Order::created_date),
            checkout_date: order.and_then(Order::checkout_date),
            rows: order
                .map(|o| o.lines().iter().map(CartRow::from).collect())
                .unwrap_or_default(),
            total: order.map(Order::total).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(id), Some(status)) = (self.order_id, self.status) {
            write!(f, "Order {} for {} ({})", id, self.customer, status)?;
            if let Some(date) = self.checkout_date {
                write!(f, ", checked out {}", date.format("%Y-%m-%d"))?;
            }
            writeln!(f)?;
        }

        if self.rows.is_empty() {
            return writeln!(f, "No product in cart");
        }

        let mut rows = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.name.clone(),
                    row.category.clone(),
                    row.price.to_string(),
                    row.quantity.to_string(),
                    row.subtotal.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        rows.push(vec![
            String::new(),
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            self.total.to_string(),
        ]);

        write_table(f, &CART_COLUMNS, &rows)
    }
}

struct Column {
    title: &'static str,
    numeric: bool,
}

const CATALOG_COLUMNS: [Column; 5] = [
    Column { title: "id", numeric: false },
    Column { title: "name", numeric: false },
    Column { title: "category", numeric: false },
    Column { title: "price", numeric: true },
    Column { title: "quantity", numeric: true },
];

const CART_COLUMNS: [Column; 6] = [
    Column { title: "id", numeric: false },
    Column { title: "name", numeric: false },
    Column { title: "category", numeric: false },
    Column { title: "price", numeric: true },
    Column { title: "quantity", numeric: true },
    Column { title: "subtotal", numeric: true },
];

fn write_table(f: &mut fmt::Formatter<'_>, columns: &[Column], rows: &[Vec<String>]) -> fmt::Result {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.title.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
    write_row(f, columns, &widths, &header)?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", rule.join("  "))?;

    for row in rows {
        write_row(f, columns, &widths, row)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, columns: &[Column], widths: &[usize], cells: &[String]) -> fmt::Result {
    let line = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, width), cell)| {
            if column.numeric {
                format!("{:>width$}", cell, width = *width)
            } else {
                format!("{:<width$}", cell, width = *width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
