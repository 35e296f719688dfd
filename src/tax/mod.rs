//! Slab tax, cess, regime comparison and salary exemptions

mod slabs;
mod regime;
mod exemptions;
pub mod loader;

pub use slabs::{apply_cess, compute_slab_tax, TaxSlab, TaxSlabTable};
pub use regime::{
    compare_regimes, compare_regimes_with, Deductions, Regime, RegimeComparison, RegimeTax,
    DEFAULT_CESS_PERCENT, SECTION_80C_LIMIT, STANDARD_DEDUCTION,
};
pub use exemptions::{hra_exemption, lta_exemption, CityType, HraExemption};
pub use loader::{load_slab_table, load_slab_table_from_reader};
