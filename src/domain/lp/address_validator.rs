use serde::Serialize;

const MIN_ADDRESS_LEN: usize = 32;
const MAX_ADDRESS_LEN: usize = 44;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Syntactic check only: length and alphabet. No checksum, no on-chain lookup.
pub fn is_solana_address(address: &str) -> bool {
    (MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&address.len())
        && address.chars().all(is_base58_char)
}

pub fn validate_wallet_address(address: &str) -> AddressValidation {
    if address.is_empty() {
        return AddressValidation {
            is_valid: false,
            error: Some("Wallet address is required".to_string()),
        };
    }

    if !is_solana_address(address) {
        return AddressValidation {
            is_valid: false,
            error: Some("Invalid Solana wallet address format".to_string()),
        };
    }

    AddressValidation {
        is_valid: true,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::{SOL_MINT, USDC_MINT};

    #[test]
    fn test_empty_address_required() {
        let result = validate_wallet_address("");
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("Wallet address is required"));
    }

    #[test]
    fn test_well_formed_addresses_accepted() {
        assert!(validate_wallet_address("11111111111111111111111111111111").is_valid);
        assert!(validate_wallet_address(SOL_MINT).is_valid);
        assert_eq!(USDC_MINT.len(), 44);
        assert!(validate_wallet_address(USDC_MINT).is_valid);
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_solana_address(&"1".repeat(31)));
        assert!(is_solana_address(&"1".repeat(32)));
        assert!(is_solana_address(&"z".repeat(44)));
        assert!(!is_solana_address(&"z".repeat(45)));
    }

    #[test]
    fn test_excluded_characters_rejected() {
        let base = "1".repeat(40);
        for bad in ['0', 'O', 'I', 'l', '-', ' '] {
            let address = format!("{}{}", base, bad);
            let result = validate_wallet_address(&address);
            assert!(!result.is_valid, "accepted {:?}", bad);
            assert_eq!(
                result.error.as_deref(),
                Some("Invalid Solana wallet address format")
            );
        }
    }
}
