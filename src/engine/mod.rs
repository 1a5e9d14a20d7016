//! Engine module containing the orchestrator, its configuration and the order builder

pub mod calculator;
pub mod config;
pub mod order;

pub use calculator::*;
pub use config::*;
pub use order::*;
