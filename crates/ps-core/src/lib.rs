//! ps-core: shared foundation for pidscope.
//!
//! Contains:
//! - numeric (Real + finiteness checks)
//! - time_grid (validated simulation time samples)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod time_grid;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use time_grid::TimeGrid;
