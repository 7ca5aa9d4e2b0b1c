use crate::core::commission::CommissionSchedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique name of a financial institution in the catalog.
///
/// # Examples
///
/// ```
/// use transfer_router::core::institution::InstitutionId;
///
/// let sber = InstitutionId::new("Sberbank");
/// let vtb = InstitutionId::new("VTB");
/// assert_ne!(sber, vtb);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(String);

impl InstitutionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstitutionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Country an institution is domiciled in.
///
/// Compared exactly: no case folding or trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which side of a transfer a commission schedule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Charged by the receiving institution.
    Inbound,
    /// Charged by the sending institution.
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

/// A financial institution that can send and receive transfers.
///
/// Two institutions can exchange funds directly only when they have at
/// least one correspondent in common.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    id: InstitutionId,
    country: CountryCode,
    outbound: CommissionSchedule,
    inbound: CommissionSchedule,
    correspondents: BTreeSet<InstitutionId>,
}

impl Institution {
    /// Create an institution with empty commission schedules and no correspondents.
    pub fn new(id: InstitutionId, country: CountryCode) -> Self {
        Self {
            id,
            country,
            outbound: CommissionSchedule::new(),
            inbound: CommissionSchedule::new(),
            correspondents: BTreeSet::new(),
        }
    }

    pub fn with_outbound(mut self, schedule: CommissionSchedule) -> Self {
        self.outbound = schedule;
        self
    }

    pub fn with_inbound(mut self, schedule: CommissionSchedule) -> Self {
        self.inbound = schedule;
        self
    }

    pub fn with_correspondents<I>(mut self, correspondents: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<InstitutionId>,
    {
        self.correspondents = correspondents.into_iter().map(Into::into).collect();
        self
    }

    /// Mutable access to one direction's schedule, used while loading.
    pub(crate) fn schedule_mut(&mut self, direction: Direction) -> &mut CommissionSchedule {
        match direction {
            Direction::Inbound => &mut self.inbound,
            Direction::Outbound => &mut self.outbound,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> &InstitutionId {
        &self.id
    }

    pub fn country(&self) -> &CountryCode {
        &self.country
    }

    pub fn outbound(&self) -> &CommissionSchedule {
        &self.outbound
    }

    pub fn inbound(&self) -> &CommissionSchedule {
        &self.inbound
    }

    pub fn schedule(&self, direction: Direction) -> &CommissionSchedule {
        match direction {
            Direction::Inbound => &self.inbound,
            Direction::Outbound => &self.outbound,
        }
    }

    pub fn correspondents(&self) -> &BTreeSet<InstitutionId> {
        &self.correspondents
    }

    /// True if the two institutions have at least one correspondent in common.
    pub fn shares_correspondent_with(&self, other: &Institution) -> bool {
        self.correspondents
            .iter()
            .any(|c| other.correspondents.contains(c))
    }
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(name: &str, correspondents: &[&str]) -> Institution {
        Institution::new(InstitutionId::new(name), CountryCode::new("RU"))
            .with_correspondents(correspondents.iter().copied())
    }

    #[test]
    fn test_institution_id_ordering() {
        assert!(InstitutionId::new("Alfa") < InstitutionId::new("VTB"));
        assert_eq!(format!("{}", InstitutionId::new("VTB")), "VTB");
    }

    #[test]
    fn test_shared_correspondent() {
        let a = bank("A", &["X", "Y"]);
        let b = bank("B", &["Y", "Z"]);
        assert!(a.shares_correspondent_with(&b));
        assert!(b.shares_correspondent_with(&a));
    }

    #[test]
    fn test_no_shared_correspondent() {
        let a = bank("A", &["X"]);
        let b = bank("B", &["Z"]);
        assert!(!a.shares_correspondent_with(&b));
        assert!(!b.shares_correspondent_with(&a));
    }

    #[test]
    fn test_empty_correspondents_never_share() {
        let a = bank("A", &[]);
        let b = bank("B", &[]);
        assert!(!a.shares_correspondent_with(&b));
    }

    #[test]
    fn test_display() {
        let a = bank("Alfa", &[]);
        assert_eq!(a.to_string(), "Alfa (RU)");
        assert_eq!(Direction::Outbound.to_string(), "outbound");
    }
}
