//! # Order Tax Engine
//!
//! Discount proration and net/gross tax computation for commerce platforms
//! that delegate order tax calculation to a webhook consumer.
//!
//! ## Features
//!
//! - **Discount allocation**: Order-level vouchers spread over shipping and every line, weighted by raw entered amount
//! - **Net/gross resolution**: Tax-inclusive and tax-exclusive price entry, per-line tax exemption
//! - **Response assembly**: Two-decimal, half-away-from-zero rendering with input line order preserved
//! - **Rate resolution**: Flat and tax-class based resolvers behind a trait
//! - **Webhook boundary**: Payload parsing, merchant/event/signature checks and a one-call handler
//!
//! ## Quick Start
//!
//! ```rust
//! use order_tax_engine::{OrderBuilder, TaxEngine};
//! use bigdecimal::BigDecimal;
//! use std::str::FromStr;
//!
//! let rate = BigDecimal::from_str("0.23").unwrap();
//! let order = OrderBuilder::new(true)
//!     .shipping(BigDecimal::from_str("12.30").unwrap(), rate.clone())
//!     .line("line-1", BigDecimal::from(60), rate)
//!     .build()
//!     .unwrap();
//!
//! let response = TaxEngine::default().calculate(&order).unwrap();
//! assert_eq!(response.shipping_price_net_amount, "10.00");
//! assert_eq!(response.lines[0].total_net_amount, "48.78");
//! ```

pub mod engine;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;
pub mod webhook;

// Re-export commonly used types
pub use engine::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
pub use webhook::*;
