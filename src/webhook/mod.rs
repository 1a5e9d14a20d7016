//! Webhook boundary: payload model, request authorization and the
//! calculate-taxes handler
//!
//! Only the interface to the transport lives here. Key storage, JWS
//! verification and HTTP routing belong to the hosting service.

pub mod payload;
pub mod request;

pub use payload::*;
pub use request::*;
