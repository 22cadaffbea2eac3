//! Build an order resource and render it in both HAL formats
//!
//! Demonstrates factory defaults, CURIE relations, embedded resources and the
//! pretty-print flag.
//!
//! Run with: cargo run --example build_and_render

use halbuilder::protocol::constants::{content_types, flags};
use halbuilder::protocol::flag;
use halbuilder::RepresentationFactory;
use serde::Serialize;

#[derive(Serialize)]
struct Order {
    currency: String,
    total: f64,
    status: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("HAL Build and Render Example");
    println!("============================\n");

    let factory = RepresentationFactory::new()
        .with_namespace("ns", "https://example.com/rels/{rel}")?
        .with_link("help", "/docs/orders")?
        .with_flag(flag(flags::PRETTY_PRINT)?)
        .with_logging(true);

    let order = Order {
        currency: "EUR".to_string(),
        total: 30.0,
        status: None,
    };

    let representation = factory
        .new_representation(Some("/orders/123"))?
        .with_link("ns:customer", "/customers/7")?
        .with_fields(&order)?
        .with_representation_fn("ns:item", Some("/items/1"), |item| {
            item.with_property("sku", "X-1")?.with_property("quantity", 2)
        })?
        .with_representation_fn("ns:item", Some("/items/2"), |item| {
            item.with_property("sku", "Y-9")?.with_property("quantity", 1)
        })?;

    for content_type in [content_types::HAL_JSON, content_types::HAL_XML] {
        println!("--- {} ---", content_type);
        println!("{}\n", factory.render(&representation, content_type)?);
    }

    Ok(())
}
