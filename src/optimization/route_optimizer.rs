use crate::core::catalog::Catalog;
use crate::core::institution::{Direction, Institution, InstitutionId};
use crate::graph::correspondent_graph::CorrespondentGraph;
use crate::optimization::route_cost::{add_checked, RouteCostEvaluator};
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which end of a transfer request a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// Precondition failures while pricing routes.
///
/// Finding no route is not an error; see [`RouteOption::infeasible`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("{endpoint} institution not found: {name}")]
    UnknownInstitution {
        name: InstitutionId,
        endpoint: Endpoint,
    },
    #[error("institution {institution} has no {direction} commission schedule")]
    MissingCommissionSchedule {
        institution: InstitutionId,
        direction: Direction,
    },
    #[error("transfer amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
    #[error("commission through {institution} exceeds the decimal range")]
    CommissionOverflow { institution: InstitutionId },
}

/// A request to move `amount` from one institution to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source: InstitutionId,
    pub destination: InstitutionId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        source: impl Into<InstitutionId>,
        destination: impl Into<InstitutionId>,
        amount: Decimal,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount,
        }
    }
}

/// A priced route, or the absence of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteOption {
    /// Institutions in transfer order: two entries for a direct route,
    /// three for a route through an intermediary, empty when infeasible.
    pub path: Vec<InstitutionId>,
    pub feasible: bool,
    /// Total commission over all legs. `None` means no route exists.
    pub total_commission: Option<Decimal>,
    /// Reported split count: the smallest of the per-leg optimal part counts.
    pub best_split_count: u32,
    /// Optimal part count of each leg, in path order.
    pub leg_splits: Vec<u32>,
}

impl RouteOption {
    /// The "no route" outcome: empty path and unbounded commission.
    pub fn infeasible() -> Self {
        Self {
            path: Vec::new(),
            feasible: false,
            total_commission: None,
            best_split_count: 1,
            leg_splits: Vec::new(),
        }
    }

    /// Number of direct transfers along the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for RouteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Best Route ===")?;
        if self.path.is_empty() {
            writeln!(f, "Path:            (none)")?;
        } else {
            let names: Vec<&str> = self.path.iter().map(|p| p.as_str()).collect();
            writeln!(f, "Path:            {}", names.join(" -> "))?;
        }
        match self.total_commission {
            Some(total) => writeln!(f, "Commission:      {}", total)?,
            None => writeln!(f, "Commission:      unbounded")?,
        }
        writeln!(
            f,
            "Guaranteed:      {}",
            if self.feasible { "yes" } else { "no" }
        )?;
        write!(f, "Optimal parts:   {}", self.best_split_count)
    }
}

/// Finds the cheapest direct or one-intermediary route for a transfer.
///
/// The optimizer only reads the catalog. Adjacency (a shared
/// correspondent) is precomputed once when the optimizer is built.
///
/// # Examples
///
/// ```
/// use transfer_router::core::border::BorderFeeTable;
/// use transfer_router::core::catalog::Catalog;
/// use transfer_router::core::commission::{CommissionSchedule, Tier};
/// use transfer_router::core::institution::{CountryCode, Institution, InstitutionId};
/// use transfer_router::optimization::route_optimizer::{RouteOptimizer, TransferRequest};
/// use rust_decimal_macros::dec;
///
/// let fees = CommissionSchedule::from_tiers(vec![Tier::new(dec!(1000), dec!(1), dec!(0))]);
/// let bank = |name: &str| {
///     Institution::new(InstitutionId::new(name), CountryCode::new("RU"))
///         .with_outbound(fees.clone())
///         .with_inbound(fees.clone())
///         .with_correspondents(["HUB"])
/// };
/// let catalog = Catalog::new(vec![bank("A"), bank("B")], BorderFeeTable::new()).unwrap();
///
/// let optimizer = RouteOptimizer::new(&catalog);
/// let best = optimizer
///     .find_best_route(&TransferRequest::new("A", "B", dec!(100)))
///     .unwrap();
/// assert!(best.feasible);
/// assert_eq!(best.total_commission, Some(dec!(2)));
/// ```
#[derive(Debug, Clone)]
pub struct RouteOptimizer<'a> {
    catalog: &'a Catalog,
    graph: CorrespondentGraph,
    evaluator: RouteCostEvaluator<'a>,
}

impl<'a> RouteOptimizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            graph: CorrespondentGraph::build(catalog),
            evaluator: RouteCostEvaluator::new(catalog.border_fees()),
        }
    }

    pub fn graph(&self) -> &CorrespondentGraph {
        &self.graph
    }

    /// Every feasible route for `request`, priced at its best split.
    ///
    /// The direct route comes first when it exists, followed by one-hop
    /// routes ordered by intermediary name.
    pub fn candidates(&self, request: &TransferRequest) -> Result<Vec<RouteOption>, RoutingError> {
        let (source, destination) = self.resolve(request)?;
        let mut candidates = Vec::new();

        if self.graph.adjacent(source.id(), destination.id()) {
            let leg = self
                .evaluator
                .best_split_cost(source, destination, request.amount)?;
            debug!(
                "direct candidate {} -> {}: {}",
                source.id(),
                destination.id(),
                leg.cost
            );
            candidates.push(RouteOption {
                path: vec![source.id().clone(), destination.id().clone()],
                feasible: true,
                total_commission: Some(leg.cost),
                best_split_count: leg.parts,
                leg_splits: vec![leg.parts],
            });
        }

        for via in self.graph.neighbors(source.id()) {
            if via == source.id() || via == destination.id() {
                continue;
            }
            if !self.graph.adjacent(via, destination.id()) {
                continue;
            }
            let Some(intermediary) = self.catalog.institution(via) else {
                continue;
            };
            let first = self
                .evaluator
                .best_split_cost(source, intermediary, request.amount)?;
            let second = self
                .evaluator
                .best_split_cost(intermediary, destination, request.amount)?;
            let total = add_checked(first.cost, second.cost, intermediary)?;
            debug!(
                "one-hop candidate {} -> {} -> {}: {}",
                source.id(),
                via,
                destination.id(),
                total
            );
            candidates.push(RouteOption {
                path: vec![
                    source.id().clone(),
                    via.clone(),
                    destination.id().clone(),
                ],
                feasible: true,
                total_commission: Some(total),
                best_split_count: first.parts.min(second.parts),
                leg_splits: vec![first.parts, second.parts],
            });
        }

        Ok(candidates)
    }

    /// The cheapest route for `request`.
    ///
    /// Ties go to the earliest candidate in [`RouteOptimizer::candidates`]
    /// order. When no route exists the result is
    /// [`RouteOption::infeasible`], not an error.
    pub fn find_best_route(&self, request: &TransferRequest) -> Result<RouteOption, RoutingError> {
        let candidates = self.candidates(request)?;
        Ok(Self::select_best(request, &candidates))
    }

    /// Pick the cheapest of already priced `candidates`, keeping the
    /// earliest on ties.
    pub fn select_best(request: &TransferRequest, candidates: &[RouteOption]) -> RouteOption {
        let mut best: Option<&RouteOption> = None;
        for candidate in candidates {
            let cheaper = match (best, candidate.total_commission) {
                (None, _) => true,
                (Some(current), Some(cost)) => {
                    current.total_commission.map_or(true, |c| cost < c)
                }
                (Some(_), None) => false,
            };
            if cheaper {
                best = Some(candidate);
            }
        }

        match best {
            Some(route) => {
                info!(
                    "best route {} -> {}: {} hop(s), commission {:?}, {} part(s)",
                    request.source,
                    request.destination,
                    route.hops(),
                    route.total_commission,
                    route.best_split_count
                );
                route.clone()
            }
            None => {
                info!(
                    "no route from {} to {}",
                    request.source, request.destination
                );
                RouteOption::infeasible()
            }
        }
    }

    fn resolve(
        &self,
        request: &TransferRequest,
    ) -> Result<(&'a Institution, &'a Institution), RoutingError> {
        if request.amount <= Decimal::ZERO {
            return Err(RoutingError::NonPositiveAmount {
                amount: request.amount,
            });
        }
        let source = self.catalog.institution(&request.source).ok_or_else(|| {
            RoutingError::UnknownInstitution {
                name: request.source.clone(),
                endpoint: Endpoint::Source,
            }
        })?;
        let destination = self
            .catalog
            .institution(&request.destination)
            .ok_or_else(|| RoutingError::UnknownInstitution {
                name: request.destination.clone(),
                endpoint: Endpoint::Destination,
            })?;
        Ok((source, destination))
    }
}
