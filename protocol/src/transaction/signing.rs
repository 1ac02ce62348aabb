//! Transaction signing with secp256k1 keys.
//!
//! Signing is a separate step from building because the key may not be
//! available at construction time. Three slots can be filled:
//!
//! - **primary**: the sender's key over [`Transaction::to_signable_bytes`].
//! - **second**: the registered second key over
//!   [`Transaction::to_second_signable_bytes`], i.e. the signable bytes
//!   followed by the primary signature.
//! - **multi**: one signature per participant of a multi-signature
//!   registration, each over the signable bytes.
//!
//! Every function here clears the cached id.

use tracing::debug;

use super::builder::Transaction;
use super::error::{SignatureSlot, TransactionError};
use crate::crypto::keys::PrivateKey;
use crate::crypto::signatures::sign;

/// Signs a transaction in place with the sender's key.
///
/// The procedure:
/// 1. Set `sender_public_key` from `key`. The key is part of the signed
///    header, so this must happen first.
/// 2. Sign the header and payload.
/// 3. Drop any second signature, which covered the old primary signature.
/// 4. Drop the multi-signatures if step 1 changed the sender key, since
///    they covered the old header.
///
/// # Example
///
/// ```rust
/// use ark_protocol::crypto::keys::PrivateKey;
/// use ark_protocol::transaction::{sign_transaction, TransactionBuilder};
///
/// let key = PrivateKey::from_passphrase("This is a top secret passphrase").unwrap();
/// let mut tx = TransactionBuilder::transfer(1_000, "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25".parse().unwrap())
///     .nonce(1)
///     .build();
///
/// sign_transaction(&mut tx, &key).unwrap();
/// assert!(tx.is_signed());
/// ```
pub fn sign_transaction<'a>(
    tx: &'a mut Transaction,
    key: &PrivateKey,
) -> Result<&'a Transaction, TransactionError> {
    let sender = key.public_key();
    if tx.sender_public_key != sender && !tx.signatures.is_empty() {
        debug!(dropped = tx.signatures.len(), "sender key changed, dropping multi-signatures");
        tx.signatures.clear();
    }
    tx.sender_public_key = sender;
    let signable = tx.to_signable_bytes()?;
    tx.signature = Some(sign(&signable, key)?);
    tx.second_signature = None;
    tx.reset_id();
    debug!(tx_type = %tx.transaction_type(), len = signable.len(), "signed transaction");
    Ok(tx)
}

/// Adds the second signature. The primary signature must already be set.
pub fn second_sign_transaction<'a>(
    tx: &'a mut Transaction,
    key: &PrivateKey,
) -> Result<&'a Transaction, TransactionError> {
    let signable = tx.to_second_signable_bytes()?;
    tx.second_signature = Some(sign(&signable, key)?);
    tx.reset_id();
    debug!(tx_type = %tx.transaction_type(), "second-signed transaction");
    Ok(tx)
}

/// Appends one participant signature to a multi-signature registration.
///
/// Fails with [`TransactionError::TooManySignatures`] once `min` signatures
/// are present.
pub fn multi_sign_transaction<'a>(
    tx: &'a mut Transaction,
    key: &PrivateKey,
) -> Result<&'a Transaction, TransactionError> {
    let min = tx.multi_signature_registration()?.min;
    if tx.signatures.len() >= min as usize {
        return Err(TransactionError::TooManySignatures { min });
    }
    let signable = tx.to_signable_bytes()?;
    tx.signatures.push(sign(&signable, key)?);
    tx.reset_id();
    debug!(
        slot = %SignatureSlot::Multi(tx.signatures.len() - 1),
        min,
        "added multi-signature"
    );
    Ok(tx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
