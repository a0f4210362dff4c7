use serde::Serialize;

use super::{LpConfigDraft, LpMode};
use crate::shared::utils::parse_decimal;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check every rule and collect every violation; never short-circuits.
///
/// Prices that do not parse as finite decimals fail both the positivity and
/// the ordering rule.
pub fn validate_lp_config(config: &LpConfigDraft) -> ConfigValidation {
    let mut errors = Vec::new();

    if config.bin_step <= 0 {
        errors.push("Bin step must be greater than 0".to_string());
    }

    let min_price = parse_decimal(&config.min_price);
    let max_price = parse_decimal(&config.max_price);

    if !min_price.is_some_and(|p| p > 0.0) {
        errors.push("Min price must be greater than 0".to_string());
    }

    if !max_price.is_some_and(|p| p > 0.0) {
        errors.push("Max price must be greater than 0".to_string());
    }

    match (min_price, max_price) {
        (Some(min), Some(max)) if min < max => {}
        _ => errors.push("Min price must be less than max price".to_string()),
    }

    if config.mode.parse::<LpMode>().is_err() {
        errors.push("Mode must be either \"zap\" or \"normal\"".to_string());
    }

    ConfigValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(bin_step: i64, min: &str, max: &str, mode: &str) -> LpConfigDraft {
        LpConfigDraft {
            bin_step,
            min_price: min.to_string(),
            max_price: max.to_string(),
            mode: mode.to_string(),
        }
    }

    #[test]
    fn test_default_draft_is_valid() {
        let result = validate_lp_config(&LpConfigDraft::default());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_non_positive_bin_step_rejected() {
        for bin_step in [0, -1, -25] {
            let result = validate_lp_config(&draft(bin_step, "0.0001", "1000", "normal"));
            assert!(!result.is_valid);
            assert!(result.errors.iter().any(|e| e.contains("Bin step")));
        }
    }

    #[test]
    fn test_min_not_below_max_rejected_regardless_of_other_fields() {
        let cases = [
            draft(25, "1000", "0.0001", "normal"),
            draft(25, "5", "5", "zap"),
            draft(-3, "10", "1", "bogus"),
        ];
        for case in cases {
            let result = validate_lp_config(&case);
            assert!(!result.is_valid);
            assert!(result
                .errors
                .iter()
                .any(|e| e == "Min price must be less than max price"));
        }
    }

    #[test]
    fn test_collects_every_violation_in_order() {
        let result = validate_lp_config(&draft(0, "-1", "0", "turbo"));
        assert_eq!(
            result.errors,
            vec![
                "Bin step must be greater than 0",
                "Min price must be greater than 0",
                "Max price must be greater than 0",
                "Min price must be less than max price",
                "Mode must be either \"zap\" or \"normal\"",
            ]
        );
    }

    #[test]
    fn test_unparseable_prices_fail() {
        let result = validate_lp_config(&draft(25, "abc", "1000", "normal"));
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Min price must be greater than 0".to_string()));
        assert!(result
            .errors
            .contains(&"Min price must be less than max price".to_string()));
    }
}
