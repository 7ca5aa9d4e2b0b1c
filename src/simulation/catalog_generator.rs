//! Random institution catalogs for benchmarks and demos.
//!
//! Generated catalogs are always well-formed: every institution has
//! ascending inbound and outbound tiers and at least one correspondent.

use crate::core::border::{BorderFee, BorderFeeTable};
use crate::core::catalog::{Catalog, CatalogError};
use crate::core::commission::{CommissionSchedule, Tier};
use crate::core::institution::{CountryCode, Institution, InstitutionId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a random catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Number of institutions.
    pub institution_count: usize,
    /// Countries institutions are spread across.
    pub countries: Vec<CountryCode>,
    /// Number of shared correspondent hubs to draw from.
    pub hub_count: usize,
    /// Correspondents assigned to each institution.
    pub correspondents_per_institution: usize,
    /// Tiers in each commission schedule.
    pub tiers_per_schedule: usize,
    /// Fixed seed for reproducible output; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            institution_count: 10,
            countries: vec![
                CountryCode::new("RU"),
                CountryCode::new("KZ"),
                CountryCode::new("BY"),
            ],
            hub_count: 6,
            correspondents_per_institution: 2,
            tiers_per_schedule: 3,
            seed: None,
        }
    }
}

/// Generate a random catalog.
pub fn generate_random_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let countries = if config.countries.is_empty() {
        vec![CountryCode::new("XX")]
    } else {
        config.countries.clone()
    };
    let hubs: Vec<InstitutionId> = (0..config.hub_count.max(1))
        .map(|i| InstitutionId::new(format!("HUB-{:02}", i)))
        .collect();
    let picks = config.correspondents_per_institution.clamp(1, hubs.len());

    let institutions: Vec<Institution> = (0..config.institution_count)
        .map(|i| {
            let country = countries[rng.gen_range(0..countries.len())].clone();
            let correspondents: Vec<InstitutionId> =
                hubs.choose_multiple(&mut rng, picks).cloned().collect();
            Institution::new(InstitutionId::new(format!("BANK-{:03}", i)), country)
                .with_outbound(random_schedule(&mut rng, config.tiers_per_schedule))
                .with_inbound(random_schedule(&mut rng, config.tiers_per_schedule))
                .with_correspondents(correspondents)
        })
        .collect();

    let mut border_fees = BorderFeeTable::new();
    for from in &countries {
        for to in &countries {
            if from != to {
                let fee = Decimal::new(rng.gen_range(0i64..2_000), 2);
                border_fees.add(BorderFee::new(from.clone(), to.clone(), fee));
            }
        }
    }

    Catalog::new(institutions, border_fees)
}

/// Ascending thresholds with random fixed fees and percentages.
fn random_schedule<R: Rng>(rng: &mut R, tiers: usize) -> CommissionSchedule {
    let mut threshold = Decimal::ZERO;
    (0..tiers.max(1))
        .map(|_| {
            threshold += Decimal::from(rng.gen_range(1_000u32..100_000));
            let fixed = Decimal::new(rng.gen_range(0i64..5_000), 2);
            // 0.0000 .. 0.0300
            let percent = Decimal::new(rng.gen_range(0i64..300), 4);
            Tier::new(threshold, fixed, percent)
        })
        .collect()
}
