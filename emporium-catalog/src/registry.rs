use serde::Serialize;
use std::collections::HashMap;
use emporium_shared::ProductId;
use crate::product::{NewProduct, Product};
use crate::{CatalogError, CatalogResult};

/// Search criteria for the global catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    ByName(String),
    ByCategory(String),
}

impl ProductQuery {
    pub fn term(&self) -> &str {
        match self {
            ProductQuery::ByName(term) | ProductQuery::ByCategory(term) => term,
        }
    }
}

/// Name and category of a catalog item
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub category: String,
}

/// The global inventory.
///
/// Holds only global records; cart line copies handed out by
/// [`ProductRegistry::duplicate_as_cart_line`] live in orders. Iteration
/// follows registration order.
#[derive(Debug, Default)]
pub struct ProductRegistry {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl ProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a global product with a freshly generated id
    pub fn register(&mut self, name: &str, category: &str, price: f64, quantity: i64) -> CatalogResult<&Product> {
        let product = Product::new_global(name, category, price, quantity)?;
        Ok(self.insert(product))
    }

    /// Register a batch of products.
    ///
    /// Every entry is validated before any is inserted, so a bad entry leaves
    /// the registry unchanged.
    pub fn register_all<I>(&mut self, entries: I) -> CatalogResult<Vec<ProductId>>
    where
        I: IntoIterator<Item = NewProduct>,
    {
        let products = entries
            .into_iter()
            .map(|entry| Product::new_global(&entry.name, &entry.category, entry.price, entry.quantity))
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(products.into_iter().map(|product| self.insert(product).id()).collect())
    }

    fn insert(&mut self, product: Product) -> &Product {
        let id = product.id();
        tracing::info!(product_id = %id, "Registered product {}", product);
        self.order.push(id);
        self.products.entry(id).or_insert(product)
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Like [`get`](Self::get), but a missing product is an error
    pub fn fetch(&self, product_id: &ProductId) -> CatalogResult<&Product> {
        self.get(product_id).ok_or(CatalogError::NotFound(*product_id))
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All global products in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(move |id| self.products.get(id))
    }

    /// Lazily yield products whose name (`ByName`) or category (`ByCategory`)
    /// contains the query term, ignoring case
    pub fn find(&self, query: &ProductQuery) -> impl Iterator<Item = &Product> + '_ {
        let needle = query.term().to_lowercase();
        let by_category = matches!(query, ProductQuery::ByCategory(_));

        self.iter().filter(move |product| {
            let haystack = if by_category { product.category() } else { product.name() };
            haystack.to_lowercase().contains(&needle)
        })
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.iter()
            .map(|product| CatalogEntry {
                name: product.name().to_string(),
                category: product.category().to_string(),
            })
            .collect()
    }

    /// Check that `quantity` units are in stock without touching them
    pub fn ensure_available(&self, product_id: &ProductId, quantity: u32) -> CatalogResult<()> {
        let product = self.fetch(product_id)?;
        if quantity > product.quantity() {
            return Err(CatalogError::InsufficientStock {
                product_id: *product_id,
                requested: u64::from(quantity),
                available: product.quantity(),
            });
        }
        Ok(())
    }

    /// Add (positive delta) or remove (negative delta) stock, returning the new level
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i64) -> CatalogResult<u32> {
        let product = self.products.get_mut(product_id)
            .ok_or(CatalogError::NotFound(*product_id))?;

        let current = product.quantity();
        let updated = i64::from(current)
            .checked_add(delta)
            .ok_or_else(|| CatalogError::Validation(format!("stock for {} would overflow", product.name())))?;
        if updated < 0 {
            return Err(CatalogError::InsufficientStock {
                product_id: *product_id,
                requested: delta.unsigned_abs(),
                available: current,
            });
        }
        let updated = u32::try_from(updated)
            .map_err(|_| CatalogError::Validation(format!("stock for {} would overflow", product.name())))?;

        product.set_stock(updated);
        tracing::debug!(product_id = %product_id, delta, "Stock for {} now {}", product.name(), updated);
        Ok(updated)
    }

    /// Copy a global product into a cart line of `quantity` units.
    ///
    /// Stock is only checked, never decremented; that happens at checkout.
    pub fn duplicate_as_cart_line(&self, product_id: &ProductId, quantity: u32) -> CatalogResult<Product> {
        if quantity == 0 {
            return Err(CatalogError::Validation("cart quantity must be at least 1".to_string()));
        }
        self.ensure_available(product_id, quantity)?;
        let product = self.fetch(product_id)?;
        Ok(product.cart_line(quantity))
    }
}
