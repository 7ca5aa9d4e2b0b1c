//! How splitting a transfer into equal parts changes the commission.
//!
//! The sender charges a low rate up to 50,000 and a steep rate above it,
//! so one large transfer costs more than several smaller ones.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use transfer_router::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  transfer-router: Split Savings Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let sender = Institution::new(InstitutionId::new("Tinkoff"), CountryCode::new("RU"))
        .with_outbound(CommissionSchedule::from_tiers(vec![
            Tier::new(dec!(50_000), dec!(30), dec!(0.001)),
            Tier::new(dec!(10_000_000), dec!(0), dec!(0.02)),
        ]))
        .with_correspondents(["VTB"]);
    let receiver = Institution::new(InstitutionId::new("Belarusbank"), CountryCode::new("BY"))
        .with_inbound(CommissionSchedule::from_tiers(vec![Tier::new(
            dec!(10_000_000),
            dec!(10),
            dec!(0),
        )]))
        .with_correspondents(["VTB"]);
    let borders: BorderFeeTable = vec![BorderFee::new(
        CountryCode::new("RU"),
        CountryCode::new("BY"),
        dec!(12),
    )]
    .into_iter()
    .collect();

    let evaluator = RouteCostEvaluator::new(&borders);
    let amount = dec!(240_000);

    println!("Sending {} from {} to {}\n", amount, sender, receiver);
    println!("  {:>5}  {:>14}  {:>14}", "parts", "per part", "total");
    for parts in 1..=MAX_SPLIT_PARTS {
        let count = Decimal::from(parts);
        match evaluator.leg_cost(&sender, &receiver, amount / count) {
            Ok(per_part) => println!(
                "  {:>5}  {:>14}  {:>14}",
                parts,
                per_part.round_dp(2),
                (per_part * count).round_dp(2)
            ),
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        }
    }

    match evaluator.best_split_cost(&sender, &receiver, amount) {
        Ok(best) => println!(
            "\nBest: {} part(s), total commission {}",
            best.parts,
            best.cost.round_dp(2)
        ),
        Err(e) => eprintln!("{}", e),
    }
}
