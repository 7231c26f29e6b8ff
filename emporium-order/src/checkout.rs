use chrono::Utc;
use emporium_catalog::ProductRegistry;
use emporium_shared::ProductId;
use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderStatus};

impl Order {
    /// Transition: Pending → Completed, decrementing global stock.
    ///
    /// Every line is checked against current stock before any quantity is
    /// touched. On failure the order stays pending and the registry is unchanged.
    pub fn checkout(&mut self, registry: &mut ProductRegistry) -> OrderResult<()> {
        self.ensure_pending()?;
        if self.lines.is_empty() {
            return Err(OrderError::Validation("cannot check out an empty order".to_string()));
        }

        let demand = self.demand();
        for (product_id, quantity) in &demand {
            if let Err(err) = registry.ensure_available(product_id, *quantity) {
                tracing::warn!(order_id = %self.id(), error = %err, "Checkout rejected");
                return Err(err.into());
            }
        }

        for (product_id, quantity) in &demand {
            registry.adjust_quantity(product_id, -i64::from(*quantity))?;
        }

        self.status = OrderStatus::Completed;
        self.checkout_date = Some(Utc::now());
        tracing::info!(
            order_id = %self.id(),
            customer = %self.customer_name(),
            "Checked out {} line(s) for {}",
            self.lines.len(),
            self.total()
        );
        Ok(())
    }

    /// Units required per global product, in line order
    fn demand(&self) -> Vec<(ProductId, u32)> {
        let mut demand: Vec<(ProductId, u32)> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let parent = line.lineage();
            match demand.iter_mut().find(|(id, _)| *id == parent) {
                Some((_, quantity)) => *quantity = quantity.saturating_add(line.quantity()),
                None => demand.push((parent, line.quantity())),
            }
        }
        demand
    }
}
