//! Utility functions and helpers

use serde::{Deserialize, Deserializer};

/// Format a UI amount with at most `decimals` fractional digits, trailing zeros trimmed
pub fn format_token_amount(amount: f64, decimals: usize) -> String {
    if amount == 0.0 {
        return "0".to_string();
    }

    let formatted = format!("{:.*}", decimals, amount);
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Parse a decimal string, rejecting NaN and infinities
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// serde helper: an explicit `null` deserializes like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
