//! # Protocol Configuration & Constants
//!
//! Every magic number in the transaction layer lives here. The wire format
//! is positional, so a wrong constant here means every node on the network
//! disagrees with you about where the fee starts.
//!
//! Network presets carry the two bytes that differ between deployments:
//! the address version (which also lands in the transaction header as the
//! `network` byte) and the WIF prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Wire Format
// ---------------------------------------------------------------------------

/// First byte of every serialized transaction. Readers ignore it.
pub const HEADER_MARKER: u8 = 0xff;

/// Fixed header length before the vendor field bytes.
pub const HEADER_LENGTH: usize = 59;

/// Offset of the vendor field length byte inside the header.
pub const VENDOR_FIELD_LENGTH_OFFSET: usize = 58;

/// The vendor field length prefix is a single byte.
pub const MAX_VENDOR_FIELD_LENGTH: usize = u8::MAX as usize;

/// Delegate usernames share the same one-byte length prefix.
pub const MAX_USERNAME_LENGTH: usize = u8::MAX as usize;

/// Marks the start of the multi-signature list in the signature block.
/// DER signatures always start with `0x30`, so this byte is unambiguous.
pub const MULTI_SIGNATURE_MARKER: u8 = 0xff;

/// Leading tag of a DER-encoded ECDSA signature (ASN.1 SEQUENCE).
pub const DER_SEQUENCE_TAG: u8 = 0x30;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Compressed secp256k1 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// secp256k1 private scalar length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// RIPEMD-160 digest length, the hash half of an address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Raw address length on the wire: version byte plus hash.
pub const ADDRESS_WIRE_LENGTH: usize = 1 + ADDRESS_HASH_LENGTH;

/// Base-58-check trailer length.
pub const CHECKSUM_LENGTH: usize = 4;

/// Appended to WIF payloads to signal a compressed public key.
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;

// ---------------------------------------------------------------------------
// Transaction Defaults
// ---------------------------------------------------------------------------

/// Transaction format version produced by the builder.
pub const DEFAULT_TRANSACTION_VERSION: u8 = 2;

/// Type group of the core transaction types.
pub const CORE_TYPE_GROUP: u32 = 1;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A known deployment of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network. Addresses start with `A`.
    Mainnet,
    /// Development network. Addresses start with `D`.
    #[default]
    Devnet,
}

impl Network {
    /// Address version byte, also used as the `network` header byte.
    pub const fn address_version(self) -> u8 {
        match self {
            Self::Mainnet => 0x17,
            Self::Devnet => 0x1e,
        }
    }

    /// WIF prefix byte.
    pub const fn wif(self) -> u8 {
        match self {
            Self::Mainnet => 0xaa,
            Self::Devnet => 0xaa,
        }
    }

    /// Looks up the network that owns an address version byte.
    pub fn from_address_version(version: u8) -> Option<Self> {
        [Self::Mainnet, Self::Devnet]
            .into_iter()
            .find(|n| n.address_version() == version)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProtocolConfig
// ---------------------------------------------------------------------------

/// Header defaults applied by [`crate::transaction::TransactionBuilder`].
///
/// Every field is optional in JSON; missing fields fall back to
/// [`ProtocolConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub network: Network,
    pub version: u8,
    pub type_group: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            version: DEFAULT_TRANSACTION_VERSION,
            type_group: CORE_TYPE_GROUP,
        }
    }
}

impl ProtocolConfig {
    /// Defaults for a specific network.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    /// Parses a JSON document such as `{"network": "mainnet"}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
