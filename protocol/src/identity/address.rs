//! # Addresses
//!
//! An address is a version byte plus the RIPEMD-160 digest of a compressed
//! public key. It has two representations that must never be confused:
//!
//! ```text
//! wire (inside transactions):  version(1) || hash(20)                        21 bytes
//! text (humans, JSON):         base58(version || hash || sha256d(..)[..4])   ~34 chars
//! ```
//!
//! The wire form carries no checksum. The transaction signature already
//! covers those bytes, so a second integrity check would be redundant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{Network, ADDRESS_HASH_LENGTH, ADDRESS_WIRE_LENGTH};
use crate::crypto::encoding::{base58check_decode, base58check_encode, EncodingError};
use crate::crypto::hash::ripemd160;
use crate::crypto::keys::{KeyError, PublicKey};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Bad base-58 text or checksum mismatch.
    #[error("address decode error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error(transparent)]
    Key(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A (version, 20-byte hash) pair.
///
/// # Examples
///
/// ```
/// use ark_protocol::identity::Address;
///
/// let address: Address = "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25".parse().unwrap();
/// assert_eq!(address.version(), 0x17);
/// assert_eq!(address.to_string(), "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    version: u8,
    hash: [u8; ADDRESS_HASH_LENGTH],
}

impl Address {
    pub const fn new(version: u8, hash: [u8; ADDRESS_HASH_LENGTH]) -> Self {
        Self { version, hash }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self) -> &[u8; ADDRESS_HASH_LENGTH] {
        &self.hash
    }

    /// The network this address belongs to, if its version byte is known.
    pub fn network(&self) -> Option<Network> {
        Network::from_address_version(self.version)
    }

    /// `hash = RIPEMD-160(compressed public key)`.
    pub fn from_public_key(public_key: &PublicKey, version: u8) -> Self {
        Self::new(version, ripemd160(public_key.as_bytes()))
    }

    pub fn from_passphrase(passphrase: &str, network: Network) -> Result<Self, AddressError> {
        let public_key = PublicKey::from_passphrase(passphrase)?;
        Ok(Self::from_public_key(&public_key, network.address_version()))
    }

    pub fn to_base58check(&self) -> String {
        base58check_encode(&self.to_wire_bytes())
    }

    /// Decodes the text form, verifying the checksum.
    pub fn from_base58check(text: &str) -> Result<Self, AddressError> {
        let payload = base58check_decode(text)?;
        Self::from_wire_bytes(&payload)
    }

    /// The checksum-free 21-byte form used inside transaction payloads.
    pub fn to_wire_bytes(&self) -> [u8; ADDRESS_WIRE_LENGTH] {
        let mut out = [0u8; ADDRESS_WIRE_LENGTH];
        out[0] = self.version;
        out[1..].copy_from_slice(&self.hash);
        out
    }

    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != ADDRESS_WIRE_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_WIRE_LENGTH,
                got: bytes.len(),
            });
        }
        let mut hash = [0u8; ADDRESS_HASH_LENGTH];
        hash.copy_from_slice(&bytes[1..]);
        Ok(Self::new(bytes[0], hash))
    }
}

/// `true` if `text` decodes with a valid checksum and, when a network is
/// given, carries that network's version byte.
pub fn validate_address(text: &str, network: Option<Network>) -> bool {
    match Address::from_base58check(text) {
        Ok(address) => network.map_or(true, |n| address.version == n.address_version()),
        Err(_) => false,
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58check())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58check())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58check(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58check())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58check(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
