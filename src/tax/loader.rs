//! CSV-based slab table loader
//!
//! Files have the header `upper_bound,rate_percent`; the top slab's bound is
//! written as `inf`.

use std::fs::File;
use std::path::Path;

use log::debug;

use crate::error::{EngineError, Result};

use super::slabs::{TaxSlab, TaxSlabTable};

/// Default directory holding slab table CSV files
pub const DEFAULT_SLAB_PATH: &str = "data/tax_slabs";

fn parse_bound(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("inf") || raw.eq_ignore_ascii_case("infinity") {
        return Ok(f64::INFINITY);
    }
    raw.parse()
        .map_err(|_| EngineError::Parse(format!("invalid upper bound `{raw}`")))
}

/// Read and validate a slab table from any CSV source
pub fn load_slab_table_from_reader<R: std::io::Read>(reader: R) -> Result<TaxSlabTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut slabs = Vec::new();

    for result in reader.records() {
        let record = result?;
        let bound = record
            .get(0)
            .ok_or_else(|| EngineError::Parse("missing upper_bound column".into()))?;
        let rate = record
            .get(1)
            .ok_or_else(|| EngineError::Parse("missing rate_percent column".into()))?;

        let rate_percent: f64 = rate
            .trim()
            .parse()
            .map_err(|_| EngineError::Parse(format!("invalid rate `{rate}`")))?;
        slabs.push(TaxSlab::new(parse_bound(bound)?, rate_percent));
    }

    TaxSlabTable::new(slabs)
}

/// Load a slab table from a CSV file
pub fn load_slab_table<P: AsRef<Path>>(path: P) -> Result<TaxSlabTable> {
    let path = path.as_ref();
    let table = load_slab_table_from_reader(File::open(path)?)?;
    debug!("loaded {} tax slabs from {}", table.slabs().len(), path.display());
    Ok(table)
}

/// Load `<name>.csv` from the default slab directory
pub fn load_named_table(name: &str) -> Result<TaxSlabTable> {
    load_slab_table(Path::new(DEFAULT_SLAB_PATH).join(format!("{name}.csv")))
}
