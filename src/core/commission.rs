use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from commission evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommissionError {
    #[error("institution has no commission tiers for this direction")]
    EmptySchedule,
    #[error("commission for amount {amount} exceeds the decimal range")]
    Overflow { amount: Decimal },
}

/// One band of a piecewise commission function.
///
/// A tier governs every amount up to and including `threshold`
/// (unless an earlier tier already did). The fee it charges is
/// `fixed_fee + amount * percent`, where `percent` is a fraction
/// (0.01 = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: Decimal,
    pub fixed_fee: Decimal,
    pub percent: Decimal,
}

impl Tier {
    pub fn new(threshold: Decimal, fixed_fee: Decimal, percent: Decimal) -> Self {
        Self {
            threshold,
            fixed_fee,
            percent,
        }
    }

    /// Fee charged by this tier for `amount`, ignoring the threshold.
    ///
    /// `None` when the result does not fit in a [`Decimal`].
    pub fn fee(&self, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(self.percent)
            .and_then(|variable| self.fixed_fee.checked_add(variable))
    }
}

/// An ordered sequence of [`Tier`]s forming a piecewise commission.
///
/// Tiers are evaluated in stored order. Callers must supply them sorted
/// ascending by threshold: the schedule never reorders them, and an
/// unsorted schedule selects the wrong tier without reporting anything.
/// [`CommissionSchedule::is_ascending`] lets loaders check this.
///
/// # Examples
///
/// ```
/// use transfer_router::core::commission::{CommissionSchedule, Tier};
/// use rust_decimal_macros::dec;
///
/// let schedule = CommissionSchedule::from_tiers(vec![
///     Tier::new(dec!(50), dec!(1), dec!(0.01)),
///     Tier::new(dec!(1000), dec!(2), dec!(0.005)),
/// ]);
///
/// assert_eq!(schedule.evaluate(dec!(50)).unwrap(), dec!(1.5));
/// assert_eq!(schedule.evaluate(dec!(100)).unwrap(), dec!(2.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionSchedule {
    tiers: Vec<Tier>,
}

impl CommissionSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiers(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// Append a tier after the existing ones.
    pub fn push(&mut self, tier: Tier) {
        self.tiers.push(tier);
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Whether thresholds are non-decreasing in stored order.
    pub fn is_ascending(&self) -> bool {
        self.tiers
            .windows(2)
            .all(|pair| pair[0].threshold <= pair[1].threshold)
    }

    /// Compute the commission for `amount`.
    ///
    /// The first tier whose threshold is `>= amount` applies. When the amount
    /// exceeds every threshold, the last tier acts as an open-ended top band.
    pub fn evaluate(&self, amount: Decimal) -> Result<Decimal, CommissionError> {
        let tier = self
            .tiers
            .iter()
            .find(|tier| amount <= tier.threshold)
            .or_else(|| self.tiers.last())
            .ok_or(CommissionError::EmptySchedule)?;
        tier.fee(amount).ok_or(CommissionError::Overflow { amount })
    }
}

impl FromIterator<Tier> for CommissionSchedule {
    fn from_iter<T: IntoIterator<Item = Tier>>(iter: T) -> Self {
        Self {
            tiers: iter.into_iter().collect(),
        }
    }
}
