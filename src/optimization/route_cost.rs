use crate::core::border::BorderFeeTable;
use crate::core::commission::CommissionError;
use crate::core::institution::{Direction, Institution};
use crate::optimization::route_optimizer::RoutingError;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest number of equal parts a leg may be split into.
pub const MAX_SPLIT_PARTS: u32 = 10;

/// Cheapest way to send an amount over one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCost {
    /// Total commission across all parts.
    pub cost: Decimal,
    /// Number of equal parts, in `1..=MAX_SPLIT_PARTS`.
    pub parts: u32,
}

/// Prices direct legs between two institutions.
///
/// A leg costs the sender's outbound commission, plus the border fee when
/// the countries differ, plus the receiver's inbound commission. Whether
/// the two institutions can actually exchange funds is the caller's
/// concern.
#[derive(Debug, Clone, Copy)]
pub struct RouteCostEvaluator<'a> {
    border_fees: &'a BorderFeeTable,
}

impl<'a> RouteCostEvaluator<'a> {
    pub fn new(border_fees: &'a BorderFeeTable) -> Self {
        Self { border_fees }
    }

    /// Commission for moving `amount` in a single transfer from `from` to `to`.
    pub fn leg_cost(
        &self,
        from: &Institution,
        to: &Institution,
        amount: Decimal,
    ) -> Result<Decimal, RoutingError> {
        let mut cost = schedule_fee(from, Direction::Outbound, amount)?;
        if from.country() != to.country() {
            let border = self.border_fees.lookup(from.country(), to.country());
            cost = add_checked(cost, border, from)?;
        }
        let inbound = schedule_fee(to, Direction::Inbound, amount)?;
        add_checked(cost, inbound, to)
    }

    /// Cheapest equal-part split of `total` over the leg `from -> to`.
    ///
    /// Tries every part count from 1 to [`MAX_SPLIT_PARTS`]. Each part pays
    /// the full leg cost for its share. On ties the smaller part count wins.
    pub fn best_split_cost(
        &self,
        from: &Institution,
        to: &Institution,
        total: Decimal,
    ) -> Result<SplitCost, RoutingError> {
        let mut best = SplitCost {
            cost: self.leg_cost(from, to, total)?,
            parts: 1,
        };
        for parts in 2..=MAX_SPLIT_PARTS {
            let count = Decimal::from(parts);
            let per_part = self.leg_cost(from, to, total / count)?;
            let cost = count
                .checked_mul(per_part)
                .ok_or_else(|| RoutingError::CommissionOverflow {
                    institution: from.id().clone(),
                })?;
            if cost < best.cost {
                best = SplitCost { cost, parts };
            }
        }
        debug!(
            "leg {} -> {}: best split {} part(s), cost {}",
            from.id(),
            to.id(),
            best.parts,
            best.cost
        );
        Ok(best)
    }
}

fn schedule_fee(
    institution: &Institution,
    direction: Direction,
    amount: Decimal,
) -> Result<Decimal, RoutingError> {
    institution
        .schedule(direction)
        .evaluate(amount)
        .map_err(|err| match err {
            CommissionError::EmptySchedule => RoutingError::MissingCommissionSchedule {
                institution: institution.id().clone(),
                direction,
            },
            CommissionError::Overflow { .. } => RoutingError::CommissionOverflow {
                institution: institution.id().clone(),
            },
        })
}

/// `a + b`, or [`RoutingError::CommissionOverflow`] charged to `institution`.
pub(crate) fn add_checked(
    a: Decimal,
    b: Decimal,
    institution: &Institution,
) -> Result<Decimal, RoutingError> {
    a.checked_add(b)
        .ok_or_else(|| RoutingError::CommissionOverflow {
            institution: institution.id().clone(),
        })
}
