use serde::Serialize;
use emporium_catalog::{Product, ProductRegistry};
use emporium_order::{Order, OrderError};
use emporium_shared::text::title_case;
use emporium_shared::ProductId;
use crate::views::CartView;
use crate::{ShopError, ShopResult};

/// Where a customer is in the shopping flow
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No order yet
    Browsing,
    /// A pending order exists
    Building,
    /// The current order has been checked out
    CheckedOut,
}

/// One customer's interaction with the shop.
///
/// The state is derived from the active order: none means `Browsing`, a
/// pending one `Building`, a completed one `CheckedOut`. A checked-out order
/// stays active, so cart changes are refused by the order itself until
/// [`start_new_order`](Self::start_new_order) moves it to `last_completed_order`.
#[derive(Debug, Clone)]
pub struct CustomerSession {
    name: String,
    active_order: Option<Order>,
    last_completed_order: Option<Order>,
}

impl CustomerSession {
    pub fn new(name: &str) -> ShopResult<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ShopError::Validation("missing customer name".to_string()));
        }

        Ok(Self {
            name: title_case(trimmed),
            active_order: None,
            last_completed_order: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        match &self.active_order {
            None => SessionState::Browsing,
            Some(order) if order.is_pending() => SessionState::Building,
            Some(_) => SessionState::CheckedOut,
        }
    }

    pub fn active_order(&self) -> Option<&Order> {
        self.active_order.as_ref()
    }

    /// The most recent completed order, including one just checked out
    pub fn last_completed_order(&self) -> Option<&Order> {
        match &self.active_order {
            Some(order) if !order.is_pending() => Some(order),
            _ => self.last_completed_order.as_ref(),
        }
    }

    /// Put `quantity` units of a global product in the cart.
    ///
    /// The first call opens an order. Stock is checked against everything
    /// already in the cart for the same product, not just this request.
    pub fn add_to_cart(&mut self, registry: &ProductRegistry, product_id: &ProductId, quantity: u32) -> ShopResult<()> {
        if let Some(order) = &self.active_order {
            order.ensure_pending()?;
        }

        let line = registry.duplicate_as_cart_line(product_id, quantity)?;
        let in_cart = self.active_order.as_ref().map_or(0, |order| order.line_quantity(product_id));
        registry.ensure_available(product_id, in_cart.saturating_add(quantity))?;

        let order = self.active_order.get_or_insert_with(|| {
            tracing::info!(customer = %self.name, "Started a new order");
            Order::new(self.name.clone())
        });
        order.add_item(line)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> ShopResult<Product> {
        let order = self.active_order.as_mut()
            .ok_or(OrderError::ItemNotFound(*product_id))?;
        Ok(order.remove_item(product_id)?)
    }

    /// Set the quantity of a cart line, checking the new amount against stock. Zero removes the line.
    pub fn update_cart_quantity(&mut self, registry: &ProductRegistry, product_id: &ProductId, new_quantity: i64) -> ShopResult<()> {
        let order = self.active_order.as_mut()
            .ok_or(OrderError::ItemNotFound(*product_id))?;
        order.ensure_pending()?;

        if new_quantity > 0 {
            if let Some(line) = order.line(product_id) {
                let wanted = u32::try_from(new_quantity)
                    .map_err(|_| ShopError::Validation(format!("quantity too large: {}", new_quantity)))?;
                registry.ensure_available(&line.lineage(), wanted)?;
            }
        }

        order.update_quantity(product_id, new_quantity)?;
        Ok(())
    }

    /// Drop the pending order. Global stock is unaffected since nothing was reserved.
    pub fn discard_order(&mut self) -> ShopResult<()> {
        if let Some(order) = &self.active_order {
            order.ensure_pending()?;
            tracing::info!(customer = %self.name, order_id = %order.id(), "Discarded order");
        }
        self.active_order = None;
        Ok(())
    }

    pub fn view_cart(&self) -> CartView {
        CartView::new(&self.name, self.active_order.as_ref())
    }

    /// Transition: Building → CheckedOut
    pub fn checkout(&mut self, registry: &mut ProductRegistry) -> ShopResult<&Order> {
        let order = self.active_order.as_mut()
            .ok_or_else(|| OrderError::Validation("cannot check out an empty order".to_string()))?;
        order.checkout(registry)?;
        Ok(order)
    }

    /// Transition: CheckedOut → Building, keeping the completed order for review
    pub fn start_new_order(&mut self) -> ShopResult<&Order> {
        if self.state() != SessionState::CheckedOut {
            return Err(ShopError::Validation(
                "the current order has not been checked out".to_string(),
            ));
        }

        self.last_completed_order = self.active_order.take();
        let order = self.active_order.insert(Order::new(self.name.clone()));
        tracing::info!(customer = %self.name, order_id = %order.id(), "Started a new order");
        Ok(order)
    }

    pub fn view_last_order(&self) -> ShopResult<CartView> {
        self.last_completed_order()
            .map(|order| CartView::new(&self.name, Some(order)))
            .ok_or_else(|| ShopError::NoCompletedOrder(self.name.clone()))
    }
}
