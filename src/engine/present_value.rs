//! Present value of a level annual payment stream

use crate::error::{ensure_finite_result, ensure_non_negative, ensure_rate_above_total_loss, Result};
use crate::rates::is_zero_rate;

/// Lump sum needed today to fund `annual_payment` at the end of each of the
/// next `years` years: `A * (1 - (1+r)^-n) / r`.
///
/// `discount_rate_percent` is often a real rate (return minus inflation) and
/// may be zero or negative. Zero falls back to `A * n`; negative rates use the
/// same closed form.
pub fn present_value_of_annuity(annual_payment: f64, discount_rate_percent: f64, years: u32) -> Result<f64> {
    ensure_non_negative("annual_payment", annual_payment)?;
    ensure_rate_above_total_loss("discount_rate_percent", discount_rate_percent)?;

    let r = discount_rate_percent / 100.0;
    if is_zero_rate(r) {
        return Ok(annual_payment * years as f64);
    }

    let discount = ensure_finite_result("years", (1.0 + r).powf(-(years as f64)))?;
    ensure_finite_result("years", annual_payment * (1.0 - discount) / r)
}
