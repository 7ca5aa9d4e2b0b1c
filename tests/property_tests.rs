use proptest::prelude::*;
use rust_decimal::Decimal;
use transfer_router::core::border::{BorderFee, BorderFeeTable};
use transfer_router::core::catalog::Catalog;
use transfer_router::core::commission::{CommissionSchedule, Tier};
use transfer_router::core::institution::{CountryCode, Institution, InstitutionId};
use transfer_router::graph::correspondent_graph::CorrespondentGraph;
use transfer_router::optimization::route_cost::{RouteCostEvaluator, MAX_SPLIT_PARTS};
use transfer_router::optimization::route_optimizer::{RouteOptimizer, TransferRequest};

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Generate a money amount with two decimal places (0.01 to 100,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a schedule of 1..4 tiers with ascending thresholds.
fn arb_schedule() -> impl Strategy<Value = CommissionSchedule> {
    prop::collection::vec((1u32..50_000, 0i64..5_000, 0i64..500), 1..4).prop_map(|raw| {
        let mut threshold = Decimal::ZERO;
        raw.into_iter()
            .map(|(step, fixed, percent)| {
                threshold += Decimal::from(step);
                Tier::new(threshold, Decimal::new(fixed, 2), Decimal::new(percent, 4))
            })
            .collect::<CommissionSchedule>()
    })
}

/// Generate a small set of correspondent hubs.
fn arb_correspondents() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(vec!["H1", "H2", "H3", "H4"], 0..3)
}

fn arb_country() -> impl Strategy<Value = CountryCode> {
    prop::sample::select(vec![
        CountryCode::new("RU"),
        CountryCode::new("KZ"),
        CountryCode::new("BY"),
    ])
}

fn arb_institution(name: &'static str) -> impl Strategy<Value = Institution> {
    (arb_country(), arb_schedule(), arb_schedule(), arb_correspondents()).prop_map(
        move |(country, outbound, inbound, correspondents)| {
            Institution::new(InstitutionId::new(name), country)
                .with_outbound(outbound)
                .with_inbound(inbound)
                .with_correspondents(correspondents)
        },
    )
}

/// Generate a full catalog of six institutions with random border fees.
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    let institutions: Vec<_> = NAMES.iter().map(|&n| arb_institution(n)).collect();
    let fees = prop::collection::vec(0i64..2_000, 6);
    (institutions, fees).prop_map(|(institutions, fees)| {
        let pairs = [
            ("RU", "KZ"),
            ("KZ", "RU"),
            ("RU", "BY"),
            ("BY", "RU"),
            ("KZ", "BY"),
            ("BY", "KZ"),
        ];
        let borders: BorderFeeTable = pairs
            .iter()
            .zip(fees)
            .map(|((from, to), fee)| {
                BorderFee::new(CountryCode::new(*from), CountryCode::new(*to), Decimal::new(fee, 2))
            })
            .collect();
        Catalog::new(institutions, borders).expect("names are unique")
    })
}

fn arb_endpoints() -> impl Strategy<Value = (&'static str, &'static str)> {
    (prop::sample::select(NAMES.to_vec()), prop::sample::select(NAMES.to_vec()))
        .prop_filter("source must differ from destination", |(s, d)| s != d)
}

fn get<'a>(catalog: &'a Catalog, name: &str) -> &'a Institution {
    catalog.institution(&InstitutionId::new(name)).unwrap()
}

proptest! {
    // ===================================================================
    // A single tier whose threshold covers the amount charges
    // fixed + amount * percent.
    // ===================================================================
    #[test]
    fn single_tier_is_linear(
        amount in arb_amount(),
        fixed in 0i64..10_000,
        percent in 0i64..1_000,
    ) {
        let fixed = Decimal::new(fixed, 2);
        let percent = Decimal::new(percent, 4);
        let schedule = CommissionSchedule::from_tiers(vec![Tier::new(amount, fixed, percent)]);
        prop_assert_eq!(schedule.evaluate(amount).unwrap(), fixed + amount * percent);
    }

    // ===================================================================
    // The best split is never worse than sending everything at once, and
    // its part count is always within 1..=MAX_SPLIT_PARTS.
    // ===================================================================
    #[test]
    fn split_never_worse_than_unsplit(
        catalog in arb_catalog(),
        (from, to) in arb_endpoints(),
        amount in arb_amount(),
    ) {
        let eval = RouteCostEvaluator::new(catalog.border_fees());
        let (a, b) = (get(&catalog, from), get(&catalog, to));
        let best = eval.best_split_cost(a, b, amount).unwrap();
        let unsplit = eval.leg_cost(a, b, amount).unwrap();
        prop_assert!(best.cost <= unsplit, "split {} > unsplit {}", best.cost, unsplit);
        prop_assert!(best.parts >= 1 && best.parts <= MAX_SPLIT_PARTS);
    }

    // ===================================================================
    // Sharing a correspondent is symmetric, and the precomputed graph
    // agrees with the pairwise predicate everywhere.
    // ===================================================================
    #[test]
    fn adjacency_is_symmetric_and_consistent(catalog in arb_catalog()) {
        let graph = CorrespondentGraph::build(&catalog);
        for a in catalog.institutions() {
            for b in catalog.institutions() {
                let shares = a.shares_correspondent_with(b);
                prop_assert_eq!(shares, b.shares_correspondent_with(a));
                prop_assert_eq!(shares, graph.adjacent(a.id(), b.id()));
            }
        }
    }

    // ===================================================================
    // The chosen route is feasible exactly when some candidate exists,
    // it is the cheapest of them, and its split count is the smallest
    // of its legs' part counts.
    // ===================================================================
    #[test]
    fn best_route_is_minimal_candidate(
        catalog in arb_catalog(),
        (from, to) in arb_endpoints(),
        amount in arb_amount(),
    ) {
        let optimizer = RouteOptimizer::new(&catalog);
        let request = TransferRequest::new(from, to, amount);
        let candidates = optimizer.candidates(&request).unwrap();
        let best = optimizer.find_best_route(&request).unwrap();

        prop_assert_eq!(best.feasible, !candidates.is_empty());
        if best.feasible {
            let best_cost = best.total_commission.unwrap();
            for candidate in &candidates {
                prop_assert!(best_cost <= candidate.total_commission.unwrap());
            }
            prop_assert!(best.path.len() == 2 || best.path.len() == 3);
            prop_assert_eq!(best.leg_splits.len(), best.path.len() - 1);
            prop_assert_eq!(
                Some(best.best_split_count),
                best.leg_splits.iter().min().copied()
            );
            prop_assert_eq!(best.path.first().map(|p| p.as_str()), Some(from));
            prop_assert_eq!(best.path.last().map(|p| p.as_str()), Some(to));
        } else {
            prop_assert!(best.path.is_empty());
            prop_assert_eq!(best.total_commission, None);
        }
    }

    // ===================================================================
    // Optimization is deterministic: identical inputs, identical output.
    // ===================================================================
    #[test]
    fn routing_is_deterministic(
        catalog in arb_catalog(),
        (from, to) in arb_endpoints(),
        amount in arb_amount(),
    ) {
        let optimizer = RouteOptimizer::new(&catalog);
        let request = TransferRequest::new(from, to, amount);
        let first = optimizer.find_best_route(&request).unwrap();
        let second = optimizer.find_best_route(&request).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.total_commission.map(|c| c.serialize()),
            second.total_commission.map(|c| c.serialize())
        );
    }
}
