//! HAL+XML codec.
//!
//! # Document layout
//!
//! ```text
//! <resource href="/orders" xmlns:ns="https://example.com/rels/{rel}"
//!           xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <link rel="ns:item" href="/orders/1"/>
//!   <count>2</count>
//!   <note xsi:nil="true"/>
//!   <resource rel="ns:item" href="/orders/1">
//!     <total>30</total>
//!   </resource>
//! </resource>
//! ```
//!
//! The `self` link is carried by the `href` attribute of each `<resource>`.
//! Nested objects become nested elements and arrays repeat their element.

mod reader;
mod renderer;

pub use reader::XmlRepresentationReader;
pub use renderer::XmlRenderer;
