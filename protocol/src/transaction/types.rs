//! Core type definitions for ledger transactions.
//!
//! The eleven transaction types form a closed set. [`Asset`] is the tagged
//! union carrying each type's payload, and a transaction's type is always
//! derived from its asset, never stored next to it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::encoding::{base58_decode, base58_encode, EncodingError};
use crate::crypto::keys::{KeyError, PublicKey};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The `type` header field of the core type group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Transfer,
    SecondSignatureRegistration,
    DelegateRegistration,
    Vote,
    MultiSignatureRegistration,
    Ipfs,
    MultiPayment,
    DelegateResignation,
    HtlcLock,
    HtlcClaim,
    HtlcRefund,
}

impl TransactionType {
    pub const ALL: [TransactionType; 11] = [
        Self::Transfer,
        Self::SecondSignatureRegistration,
        Self::DelegateRegistration,
        Self::Vote,
        Self::MultiSignatureRegistration,
        Self::Ipfs,
        Self::MultiPayment,
        Self::DelegateResignation,
        Self::HtlcLock,
        Self::HtlcClaim,
        Self::HtlcRefund,
    ];

    /// Wire value of the `type` field.
    pub const fn code(self) -> u16 {
        match self {
            Self::Transfer => 0,
            Self::SecondSignatureRegistration => 1,
            Self::DelegateRegistration => 2,
            Self::Vote => 3,
            Self::MultiSignatureRegistration => 4,
            Self::Ipfs => 5,
            Self::MultiPayment => 6,
            Self::DelegateResignation => 7,
            Self::HtlcLock => 8,
            Self::HtlcClaim => 9,
            Self::HtlcRefund => 10,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "Transfer"),
            Self::SecondSignatureRegistration => write!(f, "SecondSignatureRegistration"),
            Self::DelegateRegistration => write!(f, "DelegateRegistration"),
            Self::Vote => write!(f, "Vote"),
            Self::MultiSignatureRegistration => write!(f, "MultiSignatureRegistration"),
            Self::Ipfs => write!(f, "Ipfs"),
            Self::MultiPayment => write!(f, "MultiPayment"),
            Self::DelegateResignation => write!(f, "DelegateResignation"),
            Self::HtlcLock => write!(f, "HtlcLock"),
            Self::HtlcClaim => write!(f, "HtlcClaim"),
            Self::HtlcRefund => write!(f, "HtlcRefund"),
        }
    }
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// Direction of a vote entry. On the wire `1` is a vote, `0` an unvote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteSign {
    Vote,
    Unvote,
}

impl VoteSign {
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Vote => 1,
            Self::Unvote => 0,
        }
    }

    /// `None` for anything other than `0` or `1`.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Vote),
            0 => Some(Self::Unvote),
            _ => None,
        }
    }

    pub const fn prefix(self) -> char {
        match self {
            Self::Vote => '+',
            Self::Unvote => '-',
        }
    }
}

/// One entry of a vote transaction, rendered as `+<hex key>` or `-<hex key>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vote {
    pub sign: VoteSign,
    pub delegate_public_key: PublicKey,
}

impl Vote {
    pub fn vote(delegate_public_key: PublicKey) -> Self {
        Self {
            sign: VoteSign::Vote,
            delegate_public_key,
        }
    }

    pub fn unvote(delegate_public_key: PublicKey) -> Self {
        Self {
            sign: VoteSign::Unvote,
            delegate_public_key,
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.prefix(), self.delegate_public_key)
    }
}

impl fmt::Debug for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vote({})", self)
    }
}

impl FromStr for Vote {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sign = match s.chars().next() {
            Some('+') => VoteSign::Vote,
            Some('-') => VoteSign::Unvote,
            _ => {
                return Err(KeyError::InvalidPublicKey(
                    "vote must start with '+' or '-'".into(),
                ))
            }
        };
        Ok(Self {
            sign,
            delegate_public_key: PublicKey::from_hex(&s[1..])?,
        })
    }
}

impl Serialize for Vote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Vote {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Multihash
// ---------------------------------------------------------------------------

/// An IPFS multihash: function code, digest length, digest. Rendered as
/// plain base-58 (no checksum).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Multihash(Vec<u8>);

impl Multihash {
    /// Wraps raw multihash bytes. The codec checks that the length byte
    /// agrees with the digest before writing.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Self, EncodingError> {
        Ok(Self(base58_decode(text)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        base58_encode(&self.0)
    }
}

impl fmt::Display for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Multihash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multihash({})", self.to_base58())
    }
}

impl Serialize for Multihash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Multihash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Asset payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAsset {
    pub amount: u64,
    pub expiration: u32,
    #[serde(rename = "recipientId")]
    pub recipient: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondSignatureAsset {
    pub public_key: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateAsset {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSignatureAsset {
    pub min: u8,
    pub public_keys: Vec<PublicKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: u64,
    #[serde(rename = "recipientId")]
    pub recipient: Address,
}

/// Type-specific payload. The variant *is* the transaction type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Asset {
    Transfer(TransferAsset),
    #[serde(rename = "signature")]
    SecondSignatureRegistration(SecondSignatureAsset),
    #[serde(rename = "delegate")]
    DelegateRegistration(DelegateAsset),
    #[serde(rename = "votes")]
    Vote(Vec<Vote>),
    #[serde(rename = "multiSignature")]
    MultiSignatureRegistration(MultiSignatureAsset),
    Ipfs(Multihash),
    #[serde(rename = "payments")]
    MultiPayment(Vec<Payment>),
    DelegateResignation,
    HtlcLock,
    HtlcClaim,
    HtlcRefund,
}

impl Asset {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::SecondSignatureRegistration(_) => TransactionType::SecondSignatureRegistration,
            Self::DelegateRegistration(_) => TransactionType::DelegateRegistration,
            Self::Vote(_) => TransactionType::Vote,
            Self::MultiSignatureRegistration(_) => TransactionType::MultiSignatureRegistration,
            Self::Ipfs(_) => TransactionType::Ipfs,
            Self::MultiPayment(_) => TransactionType::MultiPayment,
            Self::DelegateResignation => TransactionType::DelegateResignation,
            Self::HtlcLock => TransactionType::HtlcLock,
            Self::HtlcClaim => TransactionType::HtlcClaim,
            Self::HtlcRefund => TransactionType::HtlcRefund,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
