//! # Key Management
//!
//! secp256k1 keys for ledger identities.
//!
//! Identities are derived from passphrases: the private scalar is the
//! SHA-256 digest of the UTF-8 passphrase, and the public key is the
//! 33-byte compressed encoding of the matching curve point.
//!
//! ## Two kinds of "public key"
//!
//! [`PublicKey`] is the 33-byte value exactly as it travels on the wire.
//! Transactions carry such keys for delegates and multi-signature
//! participants, and the codec must round-trip them byte-for-byte whether
//! or not they decode to a curve point. Point validation happens only when
//! a key is actually used to verify something
//! ([`PublicKey::to_verifying_key`]).
//!
//! Key bytes are never logged.

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::encoding::{base58check_decode, base58check_encode, hex_decode, EncodingError};
use super::hash::sha256;
use crate::config::{Network, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, WIF_COMPRESSED_FLAG};

/// Errors that can occur during key operations.
///
/// Deliberately vague about the secret itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid private key: not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid WIF: {0}")]
    InvalidWif(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 signing key.
///
/// `PrivateKey` intentionally does NOT implement `Serialize`. Exporting a
/// secret should be a conscious call to [`to_bytes`](Self::to_bytes) or
/// [`to_wif`](Self::to_wif).
///
/// # Examples
///
/// ```
/// use ark_protocol::crypto::keys::PrivateKey;
///
/// let key = PrivateKey::from_passphrase("this is a top secret passphrase").unwrap();
/// assert_eq!(
///     key.public_key().to_string(),
///     "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192"
/// );
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Fresh random key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Derives the key whose scalar is `SHA-256(passphrase)`.
    ///
    /// Fails only if the digest is zero or not below the curve order, which
    /// no one has ever observed but which the type system still makes us
    /// handle.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&sha256(passphrase.as_bytes()))
    }

    /// Raw 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidPrivateKey);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&hex_decode(hex_str)?)
    }

    /// Parses a compressed-key WIF string: `base58check(prefix || scalar || 0x01)`.
    ///
    /// The prefix byte is not checked against a network; every known
    /// network shares it.
    pub fn from_wif(wif: &str) -> Result<Self, KeyError> {
        let payload = base58check_decode(wif)?;
        if payload.len() != 1 + PRIVATE_KEY_LENGTH + 1 {
            return Err(KeyError::InvalidWif(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LENGTH + 2,
                payload.len()
            )));
        }
        if payload[PRIVATE_KEY_LENGTH + 1] != WIF_COMPRESSED_FLAG {
            return Err(KeyError::InvalidWif("missing compression flag".into()));
        }
        Self::from_bytes(&payload[1..=PRIVATE_KEY_LENGTH])
    }

    pub fn to_wif(&self, network: Network) -> String {
        let mut payload = Vec::with_capacity(PRIVATE_KEY_LENGTH + 2);
        payload.push(network.wif());
        payload.extend_from_slice(&self.to_bytes());
        payload.push(WIF_COMPRESSED_FLAG);
        base58check_encode(&payload)
    }

    /// **Handle with care.** The raw secret scalar.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.signing_key.to_bytes().into()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 33-byte compressed public key as it appears on the wire.
///
/// Displayed, parsed and serialized as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Length-checked conversion from a slice. Does not validate the point.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            KeyError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Self::from_slice(&hex_decode(hex_str)?)
    }

    pub fn from_passphrase(passphrase: &str) -> Result<Self, KeyError> {
        Ok(PrivateKey::from_passphrase(passphrase)?.public_key())
    }

    pub(crate) fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Decodes the curve point. Fails for bytes that are not a valid
    /// compressed secp256k1 point.
    pub fn to_verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_sec1_bytes(&self.bytes)
            .map_err(|_| KeyError::InvalidPublicKey("not a secp256k1 point".into()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSPHRASE: &str = "this is a top secret passphrase";
    const PUBLIC_KEY: &str = "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192";

    #[test]
    fn test_public_key_from_passphrase() {
        let pk = PublicKey::from_passphrase(PASSPHRASE).unwrap();
        assert_eq!(pk.to_hex(), PUBLIC_KEY);
        assert!(pk.to_verifying_key().is_ok());
    }

    #[test]
    fn test_passphrase_derivation_is_deterministic() {
        let a = PrivateKey::from_passphrase("repeat after me").unwrap();
        let b = PrivateKey::from_passphrase("repeat after me").unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_private_key_is_sha256_of_passphrase() {
        let key = PrivateKey::from_passphrase(PASSPHRASE).unwrap();
        assert_eq!(key.to_bytes(), sha256(PASSPHRASE.as_bytes()));
    }

    #[test]
    fn test_private_key_hex_roundtrip() {
        let key = PrivateKey::generate();
        let restored = PrivateKey::from_hex(&hex::encode(key.to_bytes())).unwrap();
        assert_eq!(key.public_key(), restored.public_key());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert_eq!(
            PrivateKey::from_bytes(&[0u8; 32]).unwrap_err(),
            KeyError::InvalidPrivateKey
        );
        assert!(PrivateKey::from_bytes(&[1u8; 31]).is_err());
    }

    #[test]
    fn test_wif_roundtrip() {
        let key = PrivateKey::from_passphrase("This is a top secret passphrase").unwrap();
        let wif = key.to_wif(Network::Mainnet);
        assert_eq!(wif, "SG8oQRwzJHxhj6JcnfjshjU4a7zsbNysbPgoq9dBw2JHz89Au2Ed");
        let restored = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(restored.to_bytes(), key.to_bytes());
    }

    #[test]
    fn test_wif_rejects_uncompressed() {
        let mut payload = vec![0xaa];
        payload.extend_from_slice(&[7u8; 32]);
        let wif = base58check_encode(&payload);
        assert!(matches!(PrivateKey::from_wif(&wif), Err(KeyError::InvalidWif(_))));
    }

    #[test]
    fn test_public_key_length_checked() {
        assert!(PublicKey::from_hex("0341").is_err());
        assert!(PublicKey::from_hex(PUBLIC_KEY).is_ok());
    }

    #[test]
    fn test_public_key_accepts_off_curve_bytes() {
        // The wire form is opaque; validation is deferred to verification.
        let pk = PublicKey::from_bytes([0x02; 33]);
        assert_eq!(PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
    }

    #[test]
    fn test_public_key_serde_is_hex_string() {
        let pk = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{}\"", PUBLIC_KEY));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = PrivateKey::from_passphrase(PASSPHRASE).unwrap();
        let dbg = format!("{:?}", key);
        assert!(!dbg.contains(&hex::encode(key.to_bytes())));
    }
}
