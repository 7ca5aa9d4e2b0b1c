//! CSV storage for institution catalogs.
//!
//! Three files, each with a header row:
//!
//! - banks: `name,country,correspondents` (correspondents separated by `;`)
//! - commissions: `bank,direction,threshold,fixed,percent` (direction is
//!   `Input` or `Output`)
//! - borders: `from,to,fee`
//!
//! Commission tiers and border fees keep their file order.

use crate::core::border::{BorderFee, BorderFeeTable};
use crate::core::catalog::{Catalog, CatalogError};
use crate::core::commission::Tier;
use crate::core::institution::{CountryCode, Direction, Institution, InstitutionId};
use log::{info, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing catalog files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing column '{column}'")]
    MissingColumn { line: u64, column: &'static str },
    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: u64, value: String },
    #[error("line {line}: commission for unknown institution {name}")]
    UnknownInstitution { line: u64, name: InstitutionId },
    #[error("line {line}: unknown commission direction {label:?}")]
    UnknownDirection { line: u64, label: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Paths of the three files making up a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub banks: PathBuf,
    pub commissions: PathBuf,
    pub borders: PathBuf,
}

impl CatalogFiles {
    /// The conventional `Banks.csv`, `Commissions.csv`, `Borders.csv` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            banks: dir.join("Banks.csv"),
            commissions: dir.join("Commissions.csv"),
            borders: dir.join("Borders.csv"),
        }
    }
}

/// Load and assemble a full catalog.
pub fn load_catalog(files: &CatalogFiles) -> Result<Catalog, LoadError> {
    let mut institutions = read_institutions(open(&files.banks)?)?;
    read_commissions(open(&files.commissions)?, &mut institutions)?;
    let border_fees = read_border_fees(open(&files.borders)?)?;

    for institution in institutions.values() {
        for direction in [Direction::Outbound, Direction::Inbound] {
            if !institution.schedule(direction).is_ascending() {
                warn!(
                    "{} {} tiers are not in ascending threshold order; they are applied as listed",
                    institution.id(),
                    direction
                );
            }
        }
    }

    info!(
        "loaded {} institutions and {} border fees",
        institutions.len(),
        border_fees.len()
    );
    Ok(Catalog::new(institutions.into_values(), border_fees)?)
}

/// Read the banks file. Later rows with a repeated name replace earlier ones.
pub fn read_institutions<R: Read>(
    reader: R,
) -> Result<BTreeMap<InstitutionId, Institution>, LoadError> {
    let mut institutions = BTreeMap::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        let line = line_of(&record);
        let name = clean(field(&record, 0, "name", line)?);
        if name.is_empty() {
            continue;
        }
        let country = clean(field(&record, 1, "country", line)?);
        let correspondents: Vec<InstitutionId> = record
            .get(2)
            .map(clean)
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(InstitutionId::new)
            .collect();

        let id = InstitutionId::new(name);
        let institution = Institution::new(id.clone(), CountryCode::new(country))
            .with_correspondents(correspondents);
        if institutions.insert(id, institution).is_some() {
            warn!("banks line {}: {} repeats an earlier row and replaces it", line, name);
        }
    }
    Ok(institutions)
}

/// Read the commissions file, appending tiers to the named institutions.
///
/// Rows with an empty numeric field are skipped. Rows whose numbers do not
/// parse are skipped with a warning.
pub fn read_commissions<R: Read>(
    reader: R,
    institutions: &mut BTreeMap<InstitutionId, Institution>,
) -> Result<(), LoadError> {
    for record in csv_reader(reader).records() {
        let record = record?;
        let line = line_of(&record);
        let name = InstitutionId::new(clean(field(&record, 0, "bank", line)?));
        let label = clean(field(&record, 1, "direction", line)?);
        let numbers = [
            record.get(2).map(clean).unwrap_or_default(),
            record.get(3).map(clean).unwrap_or_default(),
            record.get(4).map(clean).unwrap_or_default(),
        ];
        if numbers.iter().any(|n| n.is_empty()) {
            continue;
        }
        let [threshold, fixed, percent] = match parse_all(&numbers) {
            Some(parsed) => parsed,
            None => {
                warn!("skipping commission row on line {}: {:?}", line, numbers);
                continue;
            }
        };

        let direction = match label {
            "Input" => Direction::Inbound,
            "Output" => Direction::Outbound,
            other => {
                return Err(LoadError::UnknownDirection {
                    line,
                    label: other.to_string(),
                })
            }
        };
        let institution = institutions
            .get_mut(&name)
            .ok_or_else(|| LoadError::UnknownInstitution { line, name: name.clone() })?;
        institution
            .schedule_mut(direction)
            .push(Tier::new(threshold, fixed, percent));
    }
    Ok(())
}

/// Read the borders file in order.
pub fn read_border_fees<R: Read>(reader: R) -> Result<BorderFeeTable, LoadError> {
    let mut table = BorderFeeTable::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        let line = line_of(&record);
        let from = clean(field(&record, 0, "from", line)?);
        let to = clean(field(&record, 1, "to", line)?);
        let raw = clean(field(&record, 2, "fee", line)?);
        let fee = parse_decimal(raw).ok_or_else(|| LoadError::InvalidNumber {
            line,
            value: raw.to_string(),
        })?;
        table.add(BorderFee::new(CountryCode::new(from), CountryCode::new(to), fee));
    }
    Ok(table)
}

/// Write a catalog as the three CSV files described in the module docs.
pub fn write_catalog(catalog: &Catalog, files: &CatalogFiles) -> Result<(), LoadError> {
    write_institutions(catalog, create(&files.banks)?)?;
    write_commissions(catalog, create(&files.commissions)?)?;
    write_border_fees(catalog, create(&files.borders)?)?;
    Ok(())
}

pub fn write_institutions<W: Write>(catalog: &Catalog, writer: W) -> Result<(), LoadError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["name", "country", "correspondents"])?;
    for institution in catalog.institutions() {
        let correspondents: Vec<&str> = institution
            .correspondents()
            .iter()
            .map(|c| c.as_str())
            .collect();
        let correspondents = correspondents.join(";");
        out.write_record([
            institution.id().as_str(),
            institution.country().as_str(),
            correspondents.as_str(),
        ])?;
    }
    out.flush().map_err(LoadError::Write)
}

pub fn write_commissions<W: Write>(catalog: &Catalog, writer: W) -> Result<(), LoadError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["bank", "direction", "threshold", "fixed", "percent"])?;
    for institution in catalog.institutions() {
        for (direction, label) in [(Direction::Inbound, "Input"), (Direction::Outbound, "Output")] {
            for tier in institution.schedule(direction).tiers() {
                out.write_record([
                    institution.id().to_string(),
                    label.to_string(),
                    tier.threshold.to_string(),
                    tier.fixed_fee.to_string(),
                    tier.percent.to_string(),
                ])?;
            }
        }
    }
    out.flush().map_err(LoadError::Write)
}

pub fn write_border_fees<W: Write>(catalog: &Catalog, writer: W) -> Result<(), LoadError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["from", "to", "fee"])?;
    for entry in catalog.border_fees().entries() {
        out.write_record([
            entry.from.to_string(),
            entry.to.to_string(),
            entry.fee.to_string(),
        ])?;
    }
    out.flush().map_err(LoadError::Write)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<File, LoadError> {
    File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str, LoadError> {
    record
        .get(index)
        .ok_or(LoadError::MissingColumn { line, column })
}

/// Strip stray double quotes and surrounding whitespace.
fn clean(value: &str) -> &str {
    value.trim().trim_matches('"').trim()
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    value
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(value).ok())
}

fn parse_all(values: &[&str; 3]) -> Option<[Decimal; 3]> {
    Some([
        parse_decimal(values[0])?,
        parse_decimal(values[1])?,
        parse_decimal(values[2])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BANKS: &str = "name,country,correspondents\n\
        \"Alfa\",\"RU\",\"Citi;HSBC\"\n\
        Halyk,KZ,HSBC\n\
        Lonely,KZ,\n";

    #[test]
    fn test_read_institutions() {
        let banks = read_institutions(BANKS.as_bytes()).unwrap();
        assert_eq!(banks.len(), 3);
        let alfa = &banks[&InstitutionId::new("Alfa")];
        assert_eq!(alfa.country().as_str(), "RU");
        assert_eq!(alfa.correspondents().len(), 2);
        assert!(alfa.correspondents().contains(&InstitutionId::new("HSBC")));
        assert!(banks[&InstitutionId::new("Lonely")].correspondents().is_empty());
    }

    #[test]
    fn test_repeated_bank_row_replaces_earlier() {
        let banks = "name,country,correspondents\n\
            Alfa,RU,Citi\n\
            Alfa,KZ,HSBC\n";
        let banks = read_institutions(banks.as_bytes()).unwrap();
        assert_eq!(banks.len(), 1);
        let alfa = &banks[&InstitutionId::new("Alfa")];
        assert_eq!(alfa.country().as_str(), "KZ");
        assert!(alfa.correspondents().contains(&InstitutionId::new("HSBC")));
        assert!(!alfa.correspondents().contains(&InstitutionId::new("Citi")));
    }

    #[test]
    fn test_read_commissions_in_file_order() {
        let mut banks = read_institutions(BANKS.as_bytes()).unwrap();
        let commissions = "bank,direction,threshold,fixed,percent\n\
            Alfa,Output,1000,2,0.01\n\
            Alfa,Output,100000,5,0.005\n\
            Alfa,Input,1000000,0,0\n\
            Halyk,Input,,1,0.01\n\
            Halyk,Input,abc,1,0.01\n";
        read_commissions(commissions.as_bytes(), &mut banks).unwrap();

        let alfa = &banks[&InstitutionId::new("Alfa")];
        assert_eq!(alfa.outbound().tiers().len(), 2);
        assert_eq!(alfa.outbound().tiers()[1].threshold, dec!(100000));
        assert_eq!(alfa.inbound().tiers().len(), 1);
        // empty and unparsable rows are skipped
        assert!(banks[&InstitutionId::new("Halyk")].inbound().is_empty());
    }

    #[test]
    fn test_commission_for_unknown_bank() {
        let mut banks = read_institutions(BANKS.as_bytes()).unwrap();
        let commissions = "bank,direction,threshold,fixed,percent\nGhost,Input,10,1,0\n";
        let err = read_commissions(commissions.as_bytes(), &mut banks).unwrap_err();
        assert!(matches!(err, LoadError::UnknownInstitution { ref name, .. } if name.as_str() == "Ghost"));
    }

    #[test]
    fn test_unknown_direction() {
        let mut banks = read_institutions(BANKS.as_bytes()).unwrap();
        let commissions = "bank,direction,threshold,fixed,percent\nAlfa,Sideways,10,1,0\n";
        let err = read_commissions(commissions.as_bytes(), &mut banks).unwrap_err();
        assert!(matches!(err, LoadError::UnknownDirection { .. }));
    }

    #[test]
    fn test_read_border_fees() {
        let borders = "from,to,fee\nRU,KZ,5\nRU,KZ,9\nKZ,RU,1.5\n";
        let table = read_border_fees(borders.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.lookup(&CountryCode::new("RU"), &CountryCode::new("KZ")),
            dec!(5)
        );
        assert_eq!(
            table.lookup(&CountryCode::new("KZ"), &CountryCode::new("RU")),
            dec!(1.5)
        );
    }

    #[test]
    fn test_bad_border_fee() {
        let borders = "from,to,fee\nRU,KZ,lots\n";
        let err = read_border_fees(borders.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 2, .. }));
    }

    #[test]
    fn test_missing_file() {
        let files = CatalogFiles::in_dir("/nonexistent/transfer-router");
        assert!(matches!(load_catalog(&files), Err(LoadError::Io { .. })));
    }
}
