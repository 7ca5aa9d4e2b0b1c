//! # transfer-router
//!
//! Cheapest-route and split optimizer for interbank transfers.
//!
//! Given a catalog of institutions, each with tiered inbound and outbound
//! commissions and a set of correspondents, plus a table of cross-border
//! fees, this crate finds the cheapest way to move an amount from one
//! institution to another: directly, or through a single intermediary,
//! optionally split into up to ten equal parts.
//!
//! ## Architecture
//!
//! - **core**: foundational types for commission tiers, institutions, border fees, the catalog
//! - **graph**: Shared-correspondent adjacency between institutions
//! - **optimization**: Leg pricing, split search and route selection
//! - **io**: CSV loading and writing of catalogs
//! - **simulation**: Random catalog generation for benchmarks and demos

pub mod core;
pub mod graph;
pub mod io;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::border::{BorderFee, BorderFeeTable};
    pub use crate::core::catalog::Catalog;
    pub use crate::core::commission::{CommissionSchedule, Tier};
    pub use crate::core::institution::{CountryCode, Direction, Institution, InstitutionId};
    pub use crate::graph::correspondent_graph::CorrespondentGraph;
    pub use crate::optimization::route_cost::{RouteCostEvaluator, SplitCost, MAX_SPLIT_PARTS};
    pub use crate::optimization::route_optimizer::{
        RouteOption, RouteOptimizer, RoutingError, TransferRequest,
    };
}
