//! Transaction errors.
//!
//! Codec failures carry the [`Stage`] that was being processed so callers
//! can tell a truncated header from a bad signature block without parsing
//! message strings.

use std::fmt;
use thiserror::Error;

use super::types::TransactionType;
use crate::crypto::encoding::EncodingError;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;
use crate::identity::AddressError;

/// Which part of the wire form was being read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Header,
    Payload,
    Signatures,
    Identity,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Payload => write!(f, "payload"),
            Self::Signatures => write!(f, "signature block"),
            Self::Identity => write!(f, "identity"),
        }
    }
}

/// Which signature slot an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureSlot {
    Primary,
    Second,
    /// Position in the multi-signature list.
    Multi(usize),
}

impl fmt::Display for SignatureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Second => write!(f, "second"),
            Self::Multi(i) => write!(f, "multi-signature #{}", i),
        }
    }
}

/// Errors from encoding, decoding, signing or verifying a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Truncated buffer, bad text encoding, oversize length prefix, or
    /// anything else that does not fit the wire layout.
    #[error("malformed {stage}: {reason}")]
    MalformedInput { stage: Stage, reason: String },

    /// The type is known but its payload layout is not implemented.
    #[error("unsupported transaction type {tx_type} in {stage}")]
    UnsupportedVariant { stage: Stage, tx_type: TransactionType },

    #[error("{slot} signature does not verify")]
    SignatureInvalid { slot: SignatureSlot },

    #[error("transaction has no {slot} signature")]
    MissingSignature { slot: SignatureSlot },

    #[error("{have} multi-signatures present, {min} required")]
    InsufficientSignatures { have: usize, min: u8 },

    #[error("multi-signature list already holds the minimum of {min}")]
    TooManySignatures { min: u8 },

    #[error("asset mismatch: expected {expected}, found {found}")]
    AssetMismatch {
        expected: TransactionType,
        found: TransactionType,
    },

    #[error("key derivation failed: {0}")]
    KeyDerivation(#[from] KeyError),

    #[error("signing failed: {0}")]
    Signing(#[from] SignatureError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("invalid transaction JSON: {0}")]
    Json(String),
}

impl TransactionError {
    pub(crate) fn malformed(stage: Stage, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            stage,
            reason: reason.into(),
        }
    }

    /// The stage a codec error occurred in, if it is a codec error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::MalformedInput { stage, .. } | Self::UnsupportedVariant { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TransactionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
