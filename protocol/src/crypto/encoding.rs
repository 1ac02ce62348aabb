//! Text encodings: hex, base-58 and base-58-check.
//!
//! All three are pure byte transforms. Base-58 uses the Bitcoin alphabet;
//! base-58-check appends the first four bytes of a double SHA-256 of the
//! payload before encoding.

use thiserror::Error;

use super::hash::double_sha256;
use crate::config::CHECKSUM_LENGTH;

/// Errors from decoding text into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("base58check payload too short: {0} bytes")]
    TooShort(usize),

    #[error("base58check checksum mismatch")]
    ChecksumMismatch,
}

/// Lowercase hex.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode(data)
}

pub fn hex_decode(data: &str) -> Result<Vec<u8>, EncodingError> {
    hex::decode(data).map_err(|e| EncodingError::InvalidHex(e.to_string()))
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>, EncodingError> {
    bs58::decode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))
}

/// Base-58 of `payload || sha256d(payload)[..4]`.
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LENGTH);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    base58_encode(&data)
}

/// Inverse of [`base58check_encode`]. Returns the payload without the
/// checksum.
pub fn base58check_decode(data: &str) -> Result<Vec<u8>, EncodingError> {
    let decoded = base58_decode(data)?;
    if decoded.len() < CHECKSUM_LENGTH {
        return Err(EncodingError::TooShort(decoded.len()));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LENGTH);
    if double_sha256(payload)[..CHECKSUM_LENGTH] != *checksum {
        return Err(EncodingError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
