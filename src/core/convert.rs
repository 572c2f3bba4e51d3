//! Two-step conversion through the base currency of a rate table

use super::rates::RateTable;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate for {0} is zero")]
    ZeroRate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Converts `amount` of `from` into `to` as `amount / rate[from] * rate[to]`.
///
/// Both codes must be present in `table` and `amount` must be finite. The
/// result is not rounded.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    table: &RateTable,
) -> Result<f64, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount(amount.to_string()));
    }
    let rate_from = table
        .rate(from)
        .ok_or_else(|| ConversionError::UnknownCurrency(from.to_string()))?;
    let rate_to = table
        .rate(to)
        .ok_or_else(|| ConversionError::UnknownCurrency(to.to_string()))?;

    if rate_from == 0.0 {
        return Err(ConversionError::ZeroRate(from.to_string()));
    }

    Ok(amount / rate_from * rate_to)
}

/// Parses user text into a finite amount.
pub fn parse_amount(input: &str) -> Result<f64, ConversionError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConversionError::InvalidAmount(trimmed.to_string())),
    }
}
