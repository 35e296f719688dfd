//! Error types for the formula engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Out-of-domain argument, raised before any computation runs
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("invalid tax slab table: {0}")]
    InvalidSlabTable(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(field, format!("must be a finite number, got {value}")))
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(EngineError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(value)
}

/// Lump sums accept exactly -100%: the balance goes to zero and stays finite
pub(crate) fn ensure_rate_at_least_total_loss(field: &'static str, rate_percent: f64) -> Result<f64> {
    ensure_finite(field, rate_percent)?;
    if rate_percent < -100.0 {
        return Err(EngineError::invalid(
            field,
            format!("must not be below -100%, got {rate_percent}%"),
        ));
    }
    Ok(rate_percent)
}

/// Payment streams and discounting divide by or raise `(1 + r)` to negative
/// powers, so they need a rate strictly above -100%
pub(crate) fn ensure_rate_above_total_loss(field: &'static str, rate_percent: f64) -> Result<f64> {
    ensure_finite(field, rate_percent)?;
    if rate_percent <= -100.0 {
        return Err(EngineError::invalid(
            field,
            format!("must be greater than -100%, got {rate_percent}%"),
        ));
    }
    Ok(rate_percent)
}

/// Reject a computed value that overflowed to infinity or NaN
pub(crate) fn ensure_finite_result(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::invalid(field, "result overflows"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", -0.01).is_err());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_rate_above_total_loss("r", -100.0).is_err());
        assert!(ensure_rate_above_total_loss("r", -99.0).is_ok());
        assert!(ensure_rate_at_least_total_loss("r", -100.0).is_ok());
        assert!(ensure_rate_at_least_total_loss("r", -100.01).is_err());
        assert!(ensure_finite_result("term_months", f64::INFINITY).is_err());
        assert!(ensure_finite_result("term_months", f64::NAN).is_err());
    }

    #[test]
    fn test_message_names_field() {
        let err = ensure_positive("principal", -1.0).unwrap_err();
        assert!(err.to_string().contains("principal"));
    }
}
