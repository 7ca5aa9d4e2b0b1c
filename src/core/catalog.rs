use crate::core::border::BorderFeeTable;
use crate::core::institution::{Institution, InstitutionId};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while assembling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("institution {0} is defined more than once")]
    DuplicateInstitution(InstitutionId),
}

/// The immutable routing context: every known institution plus the
/// border fee table.
///
/// Built once before optimization and only read afterwards. Institutions
/// are kept ordered by name so enumeration is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    institutions: BTreeMap<InstitutionId, Institution>,
    border_fees: BorderFeeTable,
}

impl Catalog {
    /// Assemble a catalog, rejecting duplicate institution names.
    pub fn new<I>(institutions: I, border_fees: BorderFeeTable) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Institution>,
    {
        let mut map = BTreeMap::new();
        for institution in institutions {
            let id = institution.id().clone();
            if map.insert(id.clone(), institution).is_some() {
                return Err(CatalogError::DuplicateInstitution(id));
            }
        }
        Ok(Self {
            institutions: map,
            border_fees,
        })
    }

    pub fn institution(&self, id: &InstitutionId) -> Option<&Institution> {
        self.institutions.get(id)
    }

    pub fn contains(&self, id: &InstitutionId) -> bool {
        self.institutions.contains_key(id)
    }

    /// All institutions, ascending by name.
    pub fn institutions(&self) -> impl Iterator<Item = &Institution> {
        self.institutions.values()
    }

    pub fn institution_count(&self) -> usize {
        self.institutions.len()
    }

    pub fn border_fees(&self) -> &BorderFeeTable {
        &self.border_fees
    }
}
