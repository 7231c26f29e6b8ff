use anyhow::Context;
use emporium_catalog::ProductQuery;
use emporium_core::Shop;
use emporium_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Emporium");

    let mut shop = emporium_store::bootstrap(&config.catalog).context("Failed to bootstrap catalog")?;
    let customer = shop.open_session(&config.session.customer_name)?.name().to_string();
    tracing::info!("Welcome {}", customer);

    run_demo(&mut shop, &customer)?;

    shop.close_session(&customer)?;
    tracing::info!("Done");
    Ok(())
}

/// Walk one customer through browsing, filling a cart and checking out.
fn run_demo(shop: &mut Shop, customer: &str) -> anyhow::Result<()> {
    println!("{}", shop.browse());

    let electronics = shop.search(&ProductQuery::ByCategory("electronics".into()));
    println!("{}", electronics);

    let picks: Vec<_> = electronics.rows.iter().take(2).map(|row| row.id).collect();
    if picks.is_empty() {
        tracing::warn!("Nothing to buy, skipping checkout");
        return Ok(());
    }

    for (quantity, product_id) in (1..).zip(&picks) {
        let product = shop.view_product(product_id)?;
        match shop.add_to_cart(customer, product_id, quantity) {
            Ok(()) => println!("{} x {} added to cart successfully!", quantity, product.name),
            Err(err) => tracing::warn!(kind = %err.kind(), "Could not add {}: {}", product.name, err),
        }
    }
    println!("{}", shop.view_cart(customer)?);

    match shop.checkout(customer) {
        Ok(order) => println!("Check out successful. Order Number: {}; Price: {}", order.id(), order.total()),
        Err(err) => {
            tracing::warn!(kind = %err.kind(), "Checkout failed: {}", err);
            return Ok(());
        }
    }

    let last = shop.view_last_order(customer)?;
    println!("{}", last);
    println!("{}", serde_json::to_string_pretty(&last)?);

    shop.start_new_order(customer)?;
    println!("{}", shop.browse());
    Ok(())
}
