//! Savings estimator: turns a student's benefit category selection into an
//! estimated savings range, midpoint, and per-category breakdown.
//!
//! Computation is synchronous and pure. A session owns the mutable selection
//! while the category catalog is shared read-only behind an `Arc`.

pub mod domain;
pub mod router;
pub mod session;
mod valuation;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryId, CategoryValuation, EstimatorConfig, EstimatorConfigError, Role, UnknownRole,
    ValuationKind,
};
pub use router::{estimator_router, EstimateRequest};
pub use session::{
    EstimationResult, EstimationSession, EstimatorError, LineItem, PreconditionError,
    SelectionState,
};
pub use valuation::{round_currency, ValuationError};
