use crate::core::institution::CountryCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A flat fee charged for moving funds from one country to another.
///
/// Directional: `RU -> KZ` and `KZ -> RU` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderFee {
    pub from: CountryCode,
    pub to: CountryCode,
    pub fee: Decimal,
}

impl BorderFee {
    pub fn new(from: CountryCode, to: CountryCode, fee: Decimal) -> Self {
        Self { from, to, fee }
    }
}

/// Cross-border fee lookup keyed by ordered `(from, to)` country pair.
///
/// Entries keep their load order. When the same pair appears more than
/// once, the first entry wins and later ones are ignored by lookups.
///
/// # Examples
///
/// ```
/// use transfer_router::core::border::{BorderFee, BorderFeeTable};
/// use transfer_router::core::institution::CountryCode;
/// use rust_decimal_macros::dec;
///
/// let table: BorderFeeTable = vec![
///     BorderFee::new(CountryCode::new("RU"), CountryCode::new("KZ"), dec!(5)),
/// ]
/// .into_iter()
/// .collect();
///
/// let ru = CountryCode::new("RU");
/// let kz = CountryCode::new("KZ");
/// assert_eq!(table.lookup(&ru, &kz), dec!(5));
/// assert_eq!(table.lookup(&kz, &ru), dec!(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BorderFeeTable {
    entries: Vec<BorderFee>,
    /// (from, to) -> index of the first matching entry
    index: HashMap<(CountryCode, CountryCode), usize>,
}

impl BorderFeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Shadowed if its pair is already present.
    pub fn add(&mut self, entry: BorderFee) {
        let key = (entry.from.clone(), entry.to.clone());
        let position = self.entries.len();
        self.index.entry(key).or_insert(position);
        self.entries.push(entry);
    }

    /// All entries in load order, including shadowed duplicates.
    pub fn entries(&self) -> &[BorderFee] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fee for moving funds from `from` to `to`.
    ///
    /// Domestic transfers cost nothing, even if a same-country entry exists.
    /// Unknown pairs also cost nothing.
    pub fn lookup(&self, from: &CountryCode, to: &CountryCode) -> Decimal {
        if from == to {
            return Decimal::ZERO;
        }
        self.index
            .get(&(from.clone(), to.clone()))
            .map(|&i| self.entries[i].fee)
            .unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<BorderFee> for BorderFeeTable {
    fn from_iter<T: IntoIterator<Item = BorderFee>>(iter: T) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.add(entry);
        }
        table
    }
}
