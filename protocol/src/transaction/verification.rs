//! Transaction verification.
//!
//! Each signature slot is checked separately. The `verify_*` functions
//! report why a check failed; the boolean methods on [`Transaction`] are
//! thin wrappers for callers that only need a yes or no.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::builder::Transaction;
use super::error::{SignatureSlot, TransactionError};
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::verify_raw;

/// Checks the primary signature against `sender_public_key`.
///
/// # Errors
///
/// - [`TransactionError::MissingSignature`] if the transaction is unsigned.
/// - [`TransactionError::SignatureInvalid`] if the signature does not
///   verify, including when the sender key is not a curve point.
pub fn verify_transaction(tx: &Transaction) -> Result<(), TransactionError> {
    let signature = tx.signature.as_ref().ok_or(TransactionError::MissingSignature {
        slot: SignatureSlot::Primary,
    })?;
    let signable = tx.to_signable_bytes()?;
    verify_raw(&signable, signature.as_bytes(), &tx.sender_public_key).map_err(|e| {
        debug!(tx_type = %tx.transaction_type(), error = %e, "primary signature rejected");
        TransactionError::SignatureInvalid {
            slot: SignatureSlot::Primary,
        }
    })
}

/// Checks the second signature against a caller-supplied key.
///
/// The sender's registered second key lives in chain state, not in the
/// transaction, so it has to be passed in.
pub fn verify_second_signature(
    tx: &Transaction,
    second_public_key: &PublicKey,
) -> Result<(), TransactionError> {
    let signature = tx
        .second_signature
        .as_ref()
        .ok_or(TransactionError::MissingSignature {
            slot: SignatureSlot::Second,
        })?;
    let signable = tx.to_second_signable_bytes()?;
    verify_raw(&signable, signature.as_bytes(), second_public_key).map_err(|_| {
        TransactionError::SignatureInvalid {
            slot: SignatureSlot::Second,
        }
    })
}

/// Checks the multi-signature list of a multi-signature registration.
///
/// Every signature must verify under a participant key, no participant may
/// be counted twice, and at least `min` signatures must be present.
pub fn verify_multi_signatures(tx: &Transaction) -> Result<(), TransactionError> {
    let asset = tx.multi_signature_registration()?;
    if tx.signatures.len() < asset.min as usize {
        return Err(TransactionError::InsufficientSignatures {
            have: tx.signatures.len(),
            min: asset.min,
        });
    }

    let signable = tx.to_signable_bytes()?;
    let mut used: HashSet<usize> = HashSet::new();
    for (i, signature) in tx.signatures.iter().enumerate() {
        let signer = asset.public_keys.iter().enumerate().find(|(k, key)| {
            !used.contains(k) && verify_raw(&signable, signature.as_bytes(), key).is_ok()
        });
        match signer {
            Some((k, _)) => {
                used.insert(k);
            }
            None => {
                warn!(index = i, "multi-signature matches no unused participant key");
                return Err(TransactionError::SignatureInvalid {
                    slot: SignatureSlot::Multi(i),
                });
            }
        }
    }
    Ok(())
}

impl Transaction {
    /// `true` if the primary signature verifies against `sender_public_key`.
    pub fn verify(&self) -> bool {
        verify_transaction(self).is_ok()
    }

    /// `true` if the second signature verifies against `second_public_key`.
    pub fn second_verify(&self, second_public_key: &PublicKey) -> bool {
        verify_second_signature(self, second_public_key).is_ok()
    }

    pub fn verify_multi_signatures(&self) -> bool {
        verify_multi_signatures(self).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
