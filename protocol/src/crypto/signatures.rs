//! # Digital Signatures
//!
//! ECDSA over secp256k1. The message is hashed with SHA-256, signed with
//! an RFC 6979 deterministic nonce, normalized to low-S and DER encoded.
//!
//! DER matters beyond taste here: the transaction wire format relies on the
//! DER length byte to find where one signature ends and the next begins.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::Signature as EcdsaSignature;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::encoding::{hex_decode, EncodingError};
use super::hash::sha256;
use super::keys::{PrivateKey, PublicKey};

/// Errors during signature operations.
///
/// Verification failures are intentionally not detailed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("signing failed")]
    SigningFailed,

    #[error("malformed signature: {0}")]
    Malformed(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// A DER-encoded ECDSA signature, kept as the exact bytes seen on the wire.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Wraps raw bytes without parsing them.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, SignatureError> {
        Ok(Self::from_bytes(hex_decode(hex_str)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Signs `message` with `key`.
///
/// Deterministic: the same key and message always yield the same bytes.
///
/// # Example
///
/// ```
/// use ark_protocol::crypto::{sign, verify, PrivateKey};
///
/// let key = PrivateKey::from_passphrase("correct horse battery staple").unwrap();
/// let signature = sign(b"pay bob", &key).unwrap();
/// assert!(verify(b"pay bob", &signature, &key.public_key()));
/// ```
pub fn sign(message: &[u8], key: &PrivateKey) -> Result<Signature, SignatureError> {
    let digest = sha256(message);
    let signature: EcdsaSignature = key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|_| SignatureError::SigningFailed)?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(Signature::from_bytes(signature.to_der().as_bytes().to_vec()))
}

/// Returns `true` if `signature` is valid for `message` under `public_key`.
///
/// Off-curve keys and non-DER signatures are simply `false`.
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    verify_raw(message, signature.as_bytes(), public_key).is_ok()
}

/// The "bytes straight off the wire" variant of [`verify`], reporting why it
/// failed.
pub fn verify_raw(
    message: &[u8],
    der_signature: &[u8],
    public_key: &PublicKey,
) -> Result<(), SignatureError> {
    let verifying_key = public_key
        .to_verifying_key()
        .map_err(|e| SignatureError::Malformed(e.to_string()))?;
    let signature = EcdsaSignature::from_der(der_signature)
        .map_err(|_| SignatureError::Malformed("not a DER ECDSA signature".into()))?;
    verifying_key
        .verify_prehash(&sha256(message), &signature)
        .map_err(|_| SignatureError::VerificationFailed)
}
