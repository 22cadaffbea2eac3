//! Read HAL documents without knowing their format up front
//!
//! The factory sniffs the first significant byte of each input and hands it
//! to the JSON or XML reader.
//!
//! Run with: cargo run --example read_sniffed

use halbuilder::{FactoryConfig, RepresentationFactory};

const CONFIG: &str = r#"{
    "namespaces": { "ns": "https://example.com/rels/{rel}" },
    "enable_logging": true
}"#;

const INPUTS: [&str; 3] = [
    r#"{
        "_links": {
            "self": { "href": "/orders/123" },
            "ns:customer": { "href": "/customers/7" }
        },
        "total": 30.0,
        "_embedded": {
            "ns:item": [
                { "_links": { "self": { "href": "/items/1" } }, "sku": "X-1" },
                { "_links": { "self": { "href": "/items/2" } }, "sku": "Y-9" }
            ]
        }
    }"#,
    r#"<?xml version="1.0" encoding="UTF-8"?>
    <resource href="/orders/124">
        <link rel="ns:customer" href="/customers/8"/>
        <total>12.5</total>
        <resource rel="ns:item" href="/items/3"><sku>Z-2</sku></resource>
    </resource>"#,
    "42",
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("HAL Sniffing Reader Example");
    println!("===========================\n");

    let config = FactoryConfig::from_json_str(CONFIG)?;
    let factory = RepresentationFactory::from_config(&config)?;

    for input in INPUTS {
        match factory.read_representation(input.as_bytes()) {
            Ok(representation) => {
                println!("Resource: {}", representation.href().unwrap_or("(anonymous)"));
                if let Some(customer) = representation.link_by_rel("ns:customer") {
                    println!("  Customer: {}", customer.href());
                }
                if let Some(total) = representation.value("total") {
                    println!("  Total: {}", total);
                }
                for item in representation.resources_by_rel("ns:item") {
                    println!("  Item: {} {:?}", item.href().unwrap_or("?"), item.value("sku"));
                }
            }
            Err(e) => println!("Rejected input: {}", e),
        }
        println!();
    }

    Ok(())
}
