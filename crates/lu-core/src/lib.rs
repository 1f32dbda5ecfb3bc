//! lu-core: stable foundation for the linear UVLM step solver.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (finite and sign checks)
//! - order (finite-difference order of the circulation rate)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod order;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{LuError, LuResult};
pub use numeric::*;
pub use order::IntegrationOrder;
pub use units::*;
