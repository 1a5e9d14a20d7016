//! Discount proration and net/gross tax computation

pub mod allocation;
pub mod rates;
pub mod resolver;
pub mod response;

pub use allocation::*;
pub use rates::*;
pub use resolver::*;
pub use response::*;
