use std::collections::HashMap;
use emporium_catalog::{NewProduct, Product, ProductQuery, ProductRegistry};
use emporium_order::Order;
use emporium_shared::ProductId;
use crate::session::CustomerSession;
use crate::views::{CartView, CatalogRow, CatalogView};
use crate::{ShopError, ShopResult};

/// Entry point for a console front end: owns the global inventory and the
/// sessions of every active customer.
///
/// Customer-facing operations take the customer's name; names are matched
/// case-insensitively and must be unique among active sessions.
#[derive(Debug, Default)]
pub struct Shop {
    registry: ProductRegistry,
    sessions: HashMap<String, CustomerSession>,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap a shop with an initial catalog
    pub fn with_catalog<I>(entries: I) -> ShopResult<Self>
    where
        I: IntoIterator<Item = NewProduct>,
    {
        let mut shop = Self::new();
        let ids = shop.registry.register_all(entries)?;
        tracing::info!("Catalog loaded with {} product(s)", ids.len());
        Ok(shop)
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProductRegistry {
        &mut self.registry
    }

    pub fn open_session(&mut self, name: &str) -> ShopResult<&CustomerSession> {
        let session = CustomerSession::new(name)?;
        let key = session_key(session.name());
        if self.sessions.contains_key(&key) {
            return Err(ShopError::Validation(format!(
                "customer {} already has an active session",
                session.name()
            )));
        }

        tracing::info!(customer = %session.name(), "Session opened");
        Ok(self.sessions.entry(key).or_insert(session))
    }

    /// End a session. A pending order is discarded with it.
    pub fn close_session(&mut self, name: &str) -> ShopResult<CustomerSession> {
        let session = self.sessions.remove(&session_key(name))
            .ok_or_else(|| ShopError::CustomerNotFound(name.to_string()))?;
        tracing::info!(customer = %session.name(), state = ?session.state(), "Session closed");
        Ok(session)
    }

    pub fn session(&self, name: &str) -> ShopResult<&CustomerSession> {
        self.sessions.get(&session_key(name))
            .ok_or_else(|| ShopError::CustomerNotFound(name.to_string()))
    }

    pub fn active_customers(&self) -> impl Iterator<Item = &str> + '_ {
        self.sessions.values().map(CustomerSession::name)
    }

    pub fn browse(&self) -> CatalogView {
        self.registry.iter().collect()
    }

    pub fn search(&self, query: &ProductQuery) -> CatalogView {
        self.registry.find(query).collect()
    }

    pub fn view_product(&self, product_id: &ProductId) -> ShopResult<CatalogRow> {
        Ok(CatalogRow::from(self.registry.fetch(product_id)?))
    }

    pub fn add_to_cart(&mut self, customer: &str, product_id: &ProductId, quantity: u32) -> ShopResult<()> {
        let (session, registry) = self.parts(customer)?;
        session.add_to_cart(registry, product_id, quantity)
    }

    pub fn remove_from_cart(&mut self, customer: &str, product_id: &ProductId) -> ShopResult<Product> {
        let (session, _) = self.parts(customer)?;
        session.remove_from_cart(product_id)
    }

    pub fn update_cart_quantity(&mut self, customer: &str, product_id: &ProductId, new_quantity: i64) -> ShopResult<()> {
        let (session, registry) = self.parts(customer)?;
        session.update_cart_quantity(registry, product_id, new_quantity)
    }

    pub fn discard_order(&mut self, customer: &str) -> ShopResult<()> {
        let (session, _) = self.parts(customer)?;
        session.discard_order()
    }

    pub fn view_cart(&self, customer: &str) -> ShopResult<CartView> {
        Ok(self.session(customer)?.view_cart())
    }

    pub fn checkout(&mut self, customer: &str) -> ShopResult<&Order> {
        let (session, registry) = self.parts(customer)?;
        session.checkout(registry)
    }

    pub fn start_new_order(&mut self, customer: &str) -> ShopResult<&Order> {
        let (session, _) = self.parts(customer)?;
        session.start_new_order()
    }

    pub fn view_last_order(&self, customer: &str) -> ShopResult<CartView> {
        self.session(customer)?.view_last_order()
    }

    /// Borrow a session and the registry at the same time
    fn parts(&mut self, customer: &str) -> ShopResult<(&mut CustomerSession, &mut ProductRegistry)> {
        let session = self.sessions.get_mut(&session_key(customer))
            .ok_or_else(|| ShopError::CustomerNotFound(customer.to_string()))?;
        Ok((session, &mut self.registry))
    }
}

fn session_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use emporium_shared::ErrorKind;

    fn shop() -> Shop {
        Shop::with_catalog(vec![
            NewProduct::new("Laptop", "Electronics", 1200.00, 10),
            NewProduct::new("Keyboard", "Electronics", 75.00, 25),
            NewProduct::new("Mouse", "Electronics", 30.00, 50),
            NewProduct::new("Desk Chair", "Furniture", 150.00, 5),
        ])
        .unwrap()
    }

    #[test]
    fn test_bootstrap() {
        let shop = shop();
        assert_eq!(shop.browse().rows.len(), 4);
        assert!(Shop::with_catalog(vec![NewProduct::new("", "X", 1.0, 1)]).is_err());
    }

    #[test]
    fn test_session_names_are_unique() {
        let mut shop = shop();
        assert_eq!(shop.open_session("toby").unwrap().name(), "Toby");

        let err = shop.open_session("TOBY").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        shop.open_session("Ana").unwrap();
        let mut names: Vec<_> = shop.active_customers().collect();
        names.sort();
        assert_eq!(names, vec!["Ana", "Toby"]);

        // The name is free again once the session ends
        shop.close_session("Toby").unwrap();
        shop.open_session("Toby").unwrap();
    }

    #[test]
    fn test_unknown_customer() {
        let mut shop = shop();
        let laptop = shop.browse().rows[0].id;

        let err = shop.add_to_cart("Nobody", &laptop, 1).unwrap_err();
        assert_eq!(err, ShopError::CustomerNotFound("Nobody".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(shop.close_session("Nobody").is_err());
    }

    #[test]
    fn test_search_and_view_product() {
        let shop = shop();

        let furniture = shop.search(&ProductQuery::ByCategory("furn".into()));
        assert_eq!(furniture.rows.len(), 1);
        assert_eq!(furniture.rows[0].name, "Desk Chair");

        let row = shop.view_product(&furniture.rows[0].id).unwrap();
        assert_eq!(row.quantity, 5);

        assert!(shop.search(&ProductQuery::ByName("tablet".into())).is_empty());
        let err = shop.view_product(&ProductId::generate()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_closing_session_discards_pending_order() {
        let mut shop = shop();
        let laptop = shop.browse().rows[0].id;
        shop.open_session("Toby").unwrap();
        shop.add_to_cart("Toby", &laptop, 4).unwrap();

        let session = shop.close_session("Toby").unwrap();
        assert!(session.active_order().unwrap().is_pending());
        assert_eq!(shop.registry().get(&laptop).unwrap().quantity(), 10);
    }
}
