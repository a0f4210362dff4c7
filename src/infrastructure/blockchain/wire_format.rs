//! Solana transaction wire formats.
//!
//! The builder service may return either a legacy or a versioned (v0)
//! transaction. The format is sniffed from the serialized bytes up front
//! instead of trying one decoder and falling back to the other.

use std::fmt;

use solana_sdk::{
    signature::{Keypair, Signature, Signer},
    transaction::{Transaction, VersionedTransaction},
};

use crate::shared::errors::LpError;

const SIGNATURE_BYTES: usize = 64;
const MESSAGE_VERSION_PREFIX: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Legacy,
    Versioned,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Legacy => f.write_str("legacy"),
            WireFormat::Versioned => f.write_str("versioned"),
        }
    }
}

/// What the signer does after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    AwaitConfirmation,
    SubmitOnly,
}

impl WireFormat {
    /// Legacy submissions are confirmed before returning; versioned ones return
    /// as soon as the RPC node accepts them.
    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        match self {
            WireFormat::Legacy => ConfirmationPolicy::AwaitConfirmation,
            WireFormat::Versioned => ConfirmationPolicy::SubmitOnly,
        }
    }
}

/// compact-u16 ("shortvec") length prefix: returns (value, bytes consumed)
fn decode_compact_u16(bytes: &[u8]) -> Result<(usize, usize), LpError> {
    let mut value = 0usize;
    for (i, byte) in bytes.iter().take(3).enumerate() {
        value |= ((byte & 0x7f) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(LpError::Format("malformed signature count".to_string()))
}

/// Determine the wire format from the first message byte: versioned messages
/// set the high bit and carry the version in the low seven bits.
pub fn sniff_wire_format(bytes: &[u8]) -> Result<WireFormat, LpError> {
    let (num_signatures, prefix_len) = decode_compact_u16(bytes)?;
    let message_offset = prefix_len + num_signatures * SIGNATURE_BYTES;

    let first = *bytes
        .get(message_offset)
        .ok_or_else(|| LpError::Format("transaction truncated before message".to_string()))?;

    if first & MESSAGE_VERSION_PREFIX == 0 {
        return Ok(WireFormat::Legacy);
    }

    match first & !MESSAGE_VERSION_PREFIX {
        0 => Ok(WireFormat::Versioned),
        version => Err(LpError::Format(format!(
            "unsupported transaction version: {}",
            version
        ))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WireTransaction {
    Legacy(Transaction),
    Versioned(VersionedTransaction),
}

impl WireTransaction {
    pub fn decode(bytes: &[u8]) -> Result<Self, LpError> {
        match sniff_wire_format(bytes)? {
            WireFormat::Legacy => Ok(WireTransaction::Legacy(bincode::deserialize(bytes)?)),
            WireFormat::Versioned => Ok(WireTransaction::Versioned(bincode::deserialize(bytes)?)),
        }
    }

    pub fn format(&self) -> WireFormat {
        match self {
            WireTransaction::Legacy(_) => WireFormat::Legacy,
            WireTransaction::Versioned(_) => WireFormat::Versioned,
        }
    }

    /// First signature slot, which is the transaction id once signed
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            WireTransaction::Legacy(tx) => tx.signatures.first(),
            WireTransaction::Versioned(tx) => tx.signatures.first(),
        }
    }

    /// Add `keypair`'s signature, keeping signatures the builder already applied
    pub fn partial_sign(self, keypair: &Keypair) -> Result<Self, LpError> {
        match self {
            WireTransaction::Legacy(mut tx) => {
                let blockhash = tx.message.recent_blockhash;
                tx.try_partial_sign(&[keypair], blockhash)
                    .map_err(|e| LpError::Signing(e.to_string()))?;
                Ok(WireTransaction::Legacy(tx))
            }
            WireTransaction::Versioned(mut tx) => {
                let required = tx.message.header().num_required_signatures as usize;
                let signer = keypair.pubkey();
                let position = tx
                    .message
                    .static_account_keys()
                    .iter()
                    .take(required)
                    .position(|key| *key == signer)
                    .ok_or_else(|| {
                        LpError::Signing(format!("{} is not a required signer", signer))
                    })?;

                if tx.signatures.len() < required {
                    tx.signatures.resize(required, Signature::default());
                }
                tx.signatures[position] = keypair.sign_message(&tx.message.serialize());
                Ok(WireTransaction::Versioned(tx))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use solana_sdk::{
        hash::Hash,
        message::{v0, VersionedMessage},
        pubkey::Pubkey,
        signature::{Keypair, Signature, Signer},
        system_instruction,
        transaction::{Transaction, VersionedTransaction},
    };

    pub fn unsigned_legacy(payer: &Keypair) -> Transaction {
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);
        let mut tx = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
        tx.message.recent_blockhash = Hash::new_unique();
        tx
    }

    pub fn unsigned_versioned(payer: &Keypair) -> VersionedTransaction {
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);
        let message = v0::Message::try_compile(&payer.pubkey(), &[ix], &[], Hash::new_unique())
            .expect("compile v0 message");
        let required = message.header.num_required_signatures as usize;
        VersionedTransaction {
            signatures: vec![Signature::default(); required],
            message: VersionedMessage::V0(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_sniff_legacy() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&unsigned_legacy(&payer)).unwrap();
        assert_eq!(sniff_wire_format(&bytes).unwrap(), WireFormat::Legacy);
    }

    #[test]
    fn test_sniff_versioned() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&unsigned_versioned(&payer)).unwrap();
        assert_eq!(sniff_wire_format(&bytes).unwrap(), WireFormat::Versioned);
    }

    #[test]
    fn test_sniff_rejects_garbage() {
        assert!(matches!(sniff_wire_format(&[]), Err(LpError::Format(_))));
        // one signature declared, but no bytes follow
        assert!(matches!(sniff_wire_format(&[1]), Err(LpError::Format(_))));
        // zero signatures, message claims version 5
        assert!(matches!(
            sniff_wire_format(&[0, 0x85]),
            Err(LpError::Format(msg)) if msg.contains("version: 5")
        ));
        assert!(matches!(
            sniff_wire_format(&[0xff, 0xff, 0xff]),
            Err(LpError::Format(_))
        ));
    }

    #[test]
    fn test_compact_u16_multi_byte() {
        assert_eq!(decode_compact_u16(&[0x05]).unwrap(), (5, 1));
        assert_eq!(decode_compact_u16(&[0x80, 0x01]).unwrap(), (128, 2));
        assert_eq!(decode_compact_u16(&[0xff, 0xff, 0x03]).unwrap(), (65535, 3));
    }

    #[test]
    fn test_confirmation_policy_per_format() {
        assert_eq!(
            WireFormat::Legacy.confirmation_policy(),
            ConfirmationPolicy::AwaitConfirmation
        );
        assert_eq!(
            WireFormat::Versioned.confirmation_policy(),
            ConfirmationPolicy::SubmitOnly
        );
    }

    #[test]
    fn test_decode_and_sign_legacy() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&unsigned_legacy(&payer)).unwrap();

        let tx = WireTransaction::decode(&bytes).unwrap();
        assert_eq!(tx.format(), WireFormat::Legacy);

        let signed = tx.partial_sign(&payer).unwrap();
        match &signed {
            WireTransaction::Legacy(tx) => assert!(tx.verify().is_ok()),
            other => panic!("expected legacy, got {:?}", other.format()),
        }
        assert_ne!(signed.signature(), Some(&Signature::default()));
    }

    #[test]
    fn test_decode_and_sign_versioned() {
        let payer = Keypair::new();
        let bytes = bincode::serialize(&unsigned_versioned(&payer)).unwrap();

        let tx = WireTransaction::decode(&bytes).unwrap();
        assert_eq!(tx.format(), WireFormat::Versioned);

        let signed = tx.partial_sign(&payer).unwrap();
        let reencoded = match &signed {
            WireTransaction::Versioned(tx) => {
                assert!(tx.verify_with_results().iter().all(|ok| *ok));
                bincode::serialize(tx).unwrap()
            }
            other => panic!("expected versioned, got {:?}", other.format()),
        };
        assert_eq!(WireTransaction::decode(&reencoded).unwrap(), signed);
    }

    #[test]
    fn test_sign_with_foreign_key_fails() {
        let payer = Keypair::new();
        let stranger = Keypair::new();

        let versioned = WireTransaction::Versioned(unsigned_versioned(&payer));
        assert!(matches!(
            versioned.partial_sign(&stranger),
            Err(LpError::Signing(_))
        ));

        let legacy = WireTransaction::Legacy(unsigned_legacy(&payer));
        assert!(matches!(legacy.partial_sign(&stranger), Err(LpError::Signing(_))));
    }
}
