use emporium_catalog::Product;
use emporium_shared::ProductId;
use crate::error::{OrderError, OrderResult};
use crate::models::Order;

/// Cart mutations. All of them fail with `Closed` once the order is checked out.
impl Order {
    /// Add a cart line, merging it into an existing line for the same product
    pub fn add_item(&mut self, item: Product) -> OrderResult<()> {
        self.ensure_pending()?;
        if !item.is_cart_line() {
            return Err(OrderError::Validation(format!(
                "{} is a global inventory record, not a cart line",
                item.name()
            )));
        }

        match self.lines.iter().position(|line| line.parent_id() == item.parent_id()) {
            Some(idx) => {
                let merged = self.lines[idx].combined_with(&item)?;
                tracing::debug!(order_id = %self.id(), "Cart now holds {} x {}", merged.quantity(), merged.name());
                self.lines[idx] = merged;
            }
            None => {
                tracing::debug!(order_id = %self.id(), "Added {} x {} to cart", item.quantity(), item.name());
                self.lines.push(item);
            }
        }
        Ok(())
    }

    /// Remove a line entirely, returning it
    pub fn remove_item(&mut self, product_id: &ProductId) -> OrderResult<Product> {
        self.ensure_pending()?;
        let idx = self.position(product_id)
            .ok_or(OrderError::ItemNotFound(*product_id))?;

        let removed = self.lines.remove(idx);
        tracing::debug!(order_id = %self.id(), "Removed {} from cart", removed.name());
        Ok(removed)
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) -> OrderResult<()> {
        self.ensure_pending()?;
        if new_quantity < 0 {
            return Err(OrderError::Validation(format!("quantity cannot be negative: {}", new_quantity)));
        }
        let idx = self.position(product_id)
            .ok_or(OrderError::ItemNotFound(*product_id))?;

        if new_quantity == 0 {
            let removed = self.lines.remove(idx);
            tracing::debug!(order_id = %self.id(), "Removed {} from cart", removed.name());
            return Ok(());
        }

        self.lines[idx].set_quantity(new_quantity)?;
        Ok(())
    }

    /// Empty the cart
    pub fn clear(&mut self) -> OrderResult<()> {
        self.ensure_pending()?;
        self.lines.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use emporium_catalog::ProductRegistry;
    use emporium_shared::ErrorKind;

    struct Fixture {
        registry: ProductRegistry,
        laptop: ProductId,
        mouse: ProductId,
    }

    fn fixture() -> Fixture {
        let mut registry = ProductRegistry::new();
        let laptop = registry.register("Laptop", "Electronics", 1200.00, 10).unwrap().id();
        let mouse = registry.register("Mouse", "Electronics", 30.00, 50).unwrap().id();
        Fixture { registry, laptop, mouse }
    }

    fn filled_order(fx: &Fixture) -> Order {
        let mut order = Order::new("Toby");
        order.add_item(fx.registry.duplicate_as_cart_line(&fx.laptop, 3).unwrap()).unwrap();
        order.add_item(fx.registry.duplicate_as_cart_line(&fx.mouse, 2).unwrap()).unwrap();
        order
    }

    #[test]
    fn test_add_item_merges_same_product() {
        let fx = fixture();
        let mut order = filled_order(&fx);

        order.add_item(fx.registry.duplicate_as_cart_line(&fx.laptop, 2).unwrap()).unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.line_quantity(&fx.laptop), 5);
        // Merging keeps the line's position
        assert_eq!(order.lines()[0].parent_id(), Some(fx.laptop));
    }

    #[test]
    fn test_add_item_rejects_global_records() {
        let fx = fixture();
        let mut order = Order::new("Toby");
        let global = fx.registry.get(&fx.laptop).unwrap().clone();

        let err = order.add_item(global).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(order.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let fx = fixture();
        let mut order = filled_order(&fx);

        let removed = order.remove_item(&fx.laptop).unwrap();
        assert_eq!(removed.name(), "Laptop");
        assert_eq!(order.lines().len(), 1);

        let err = order.remove_item(&fx.laptop).unwrap_err();
        assert_eq!(err, OrderError::ItemNotFound(fx.laptop));
    }

    #[test]
    fn test_remove_item_by_line_id() {
        let fx = fixture();
        let mut order = filled_order(&fx);
        let line_id = order.line(&fx.mouse).unwrap().id();

        order.remove_item(&line_id).unwrap();
        assert!(order.line(&fx.mouse).is_none());
    }

    #[test]
    fn test_update_quantity() {
        let fx = fixture();
        let mut order = filled_order(&fx);

        order.update_quantity(&fx.laptop, 1).unwrap();
        assert_eq!(order.line_quantity(&fx.laptop), 1);

        let err = order.update_quantity(&fx.laptop, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(order.line_quantity(&fx.laptop), 1);

        let err = order.update_quantity(&ProductId::generate(), 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let fx = fixture();
        let mut order = filled_order(&fx);

        order.update_quantity(&fx.mouse, 0).unwrap();

        assert_eq!(order.lines().len(), 1);
        assert!(order.line(&fx.mouse).is_none());
    }

    #[test]
    fn test_completed_order_rejects_changes() {
        let mut fx = fixture();
        let mut order = filled_order(&fx);
        order.checkout(&mut fx.registry).unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);

        let before: Vec<_> = order.lines().iter().map(|l| (l.id(), l.quantity())).collect();
        let extra = fx.registry.duplicate_as_cart_line(&fx.mouse, 1).unwrap();

        assert_eq!(order.add_item(extra).unwrap_err().kind(), ErrorKind::OrderClosed);
        assert_eq!(order.remove_item(&fx.laptop).unwrap_err().kind(), ErrorKind::OrderClosed);
        assert_eq!(order.update_quantity(&fx.mouse, 9).unwrap_err().kind(), ErrorKind::OrderClosed);
        assert_eq!(order.update_quantity(&fx.mouse, -1).unwrap_err().kind(), ErrorKind::OrderClosed);
        assert_eq!(order.clear().unwrap_err().kind(), ErrorKind::OrderClosed);

        let after: Vec<_> = order.lines().iter().map(|l| (l.id(), l.quantity())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear() {
        let fx = fixture();
        let mut order = filled_order(&fx);
        order.clear().unwrap();
        assert!(order.is_empty());
    }
}
