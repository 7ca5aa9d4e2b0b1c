//! Cheapest route between two banks in different countries.
//!
//! The sender and receiver share no correspondent, so funds must pass
//! through one of two candidate intermediaries. The cheaper one wins.

use rust_decimal_macros::dec;
use transfer_router::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  transfer-router: Cheapest Route Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let standard = CommissionSchedule::from_tiers(vec![
        Tier::new(dec!(10_000), dec!(15), dec!(0.01)),
        Tier::new(dec!(1_000_000), dec!(50), dec!(0.005)),
    ]);
    let cheap = CommissionSchedule::from_tiers(vec![Tier::new(dec!(1_000_000), dec!(5), dec!(0.002))]);

    let institutions = vec![
        Institution::new(InstitutionId::new("Alfa"), CountryCode::new("RU"))
            .with_outbound(standard.clone())
            .with_inbound(standard.clone())
            .with_correspondents(["Citi", "Raiffeisen"]),
        Institution::new(InstitutionId::new("Halyk"), CountryCode::new("KZ"))
            .with_outbound(standard.clone())
            .with_inbound(standard.clone())
            .with_correspondents(["HSBC", "Deutsche"]),
        Institution::new(InstitutionId::new("Kaspi"), CountryCode::new("KZ"))
            .with_outbound(standard.clone())
            .with_inbound(standard)
            .with_correspondents(["Citi", "HSBC"]),
        Institution::new(InstitutionId::new("Sber"), CountryCode::new("RU"))
            .with_outbound(cheap.clone())
            .with_inbound(cheap)
            .with_correspondents(["Raiffeisen", "Deutsche"]),
    ];

    let borders: BorderFeeTable = vec![
        BorderFee::new(CountryCode::new("RU"), CountryCode::new("KZ"), dec!(25)),
        BorderFee::new(CountryCode::new("KZ"), CountryCode::new("RU"), dec!(20)),
    ]
    .into_iter()
    .collect();

    let catalog = match Catalog::new(institutions, borders) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let optimizer = RouteOptimizer::new(&catalog);
    let request = TransferRequest::new("Alfa", "Halyk", dec!(150_000));

    println!("━━━ Candidates ━━━\n");
    match optimizer.candidates(&request) {
        Ok(candidates) => {
            for candidate in &candidates {
                let names: Vec<&str> = candidate.path.iter().map(|p| p.as_str()).collect();
                println!(
                    "  {:<28} {:>12}  parts per leg {:?}",
                    names.join(" -> "),
                    candidate.total_commission.unwrap_or_default(),
                    candidate.leg_splits
                );
            }
        }
        Err(e) => eprintln!("{}", e),
    }

    println!("\n━━━ Selected ━━━\n");
    match optimizer.find_best_route(&request) {
        Ok(best) => println!("{}", best),
        Err(e) => eprintln!("{}", e),
    }
}
