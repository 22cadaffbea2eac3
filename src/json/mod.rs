//! HAL+JSON codec.
//!
//! # Document layout
//!
//! ```text
//! {
//!   "_links": {
//!     "curies": [ { "name": "ns", "href": "https://example.com/rels/{rel}", "templated": true } ],
//!     "self":   { "href": "/orders" },
//!     "ns:item": [ { "href": "/orders/1" }, { "href": "/orders/2" } ]
//!   },
//!   "count": 2,
//!   "_embedded": {
//!     "ns:item": [ { ... }, { ... } ]
//!   }
//! }
//! ```
//!
//! A rel with a single link or embedded resource is written as an object and
//! several as an array; the reader accepts either shape for any rel.

mod reader;
mod renderer;

pub use reader::JsonRepresentationReader;
pub use renderer::{to_hal_value, JsonRenderer};
