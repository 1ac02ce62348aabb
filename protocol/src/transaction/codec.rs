//! # Wire Codec
//!
//! The packed binary form of a transaction:
//!
//! ```text
//! header      marker(1) version(1) network(1) type_group(4) type(2) nonce(8)
//!             sender_public_key(33) fee(8) vendor_len(1) vendor_field(vendor_len)
//! payload     type-specific, see below
//! signatures  [primary DER] [second DER] [0xff multi DER...]
//! ```
//!
//! All integers are little-endian. Payload layouts:
//!
//! | type | layout |
//! |---|---|
//! | Transfer | amount(8) expiration(4) recipient(21) |
//! | SecondSignatureRegistration | public_key(33) |
//! | DelegateRegistration | len(1) username(len) |
//! | Vote | count(1) then count × (sign(1) key(33)) |
//! | MultiSignatureRegistration | min(1) count(1) then count × key(33) |
//! | Ipfs | function(1) len(1) digest(len) |
//! | MultiPayment | count(2) then count × (amount(8) recipient(21)) |
//!
//! Resignation and HTLC payloads are not implemented and report
//! [`TransactionError::UnsupportedVariant`].
//!
//! ## Signature block
//!
//! DER signatures are self-delimiting: byte 0 is `0x30` and byte 1 is the
//! length of what follows. The reader takes a primary signature, then a
//! second signature unless the next byte is the `0xff` multi-signature
//! marker, then (after the marker) DER signatures until the buffer ends.
//!
//! Decoding never panics and never returns a partial transaction. Every
//! read is bounds checked and failures name the [`Stage`].

use std::sync::OnceLock;

use tracing::{debug, trace};

use super::builder::Transaction;
use super::error::{Stage, TransactionError};
use super::types::{
    Asset, DelegateAsset, MultiSignatureAsset, Multihash, Payment, SecondSignatureAsset,
    TransactionType, TransferAsset, Vote, VoteSign,
};
use crate::config::{
    ADDRESS_WIRE_LENGTH, DER_SEQUENCE_TAG, HEADER_LENGTH, HEADER_MARKER, MAX_USERNAME_LENGTH,
    MAX_VENDOR_FIELD_LENGTH, MULTI_SIGNATURE_MARKER, PUBLIC_KEY_LENGTH,
};
use crate::crypto::encoding::hex_decode;
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::Signature;
use crate::identity::Address;

type Result<T> = std::result::Result<T, TransactionError>;

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Forward-only cursor over the wire bytes.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    stage: Stage,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            stage: Stage::Header,
        }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(TransactionError::malformed(
                self.stage,
                format!(
                    "need {} bytes at offset {}, only {} left",
                    n,
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array()?))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array()?))
    }

    fn public_key(&mut self) -> Result<PublicKey> {
        Ok(PublicKey::from_bytes(self.array::<PUBLIC_KEY_LENGTH>()?))
    }

    fn address(&mut self) -> Result<Address> {
        let raw = self.take(ADDRESS_WIRE_LENGTH)?;
        Address::from_wire_bytes(raw)
            .map_err(|e| TransactionError::malformed(self.stage, e.to_string()))
    }

    fn utf8(&mut self, len: usize, what: &str) -> Result<String> {
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| {
            TransactionError::malformed(self.stage, format!("{} is not valid UTF-8", what))
        })
    }

    fn der_signature(&mut self) -> Result<Signature> {
        if self.remaining() < 2 {
            return Err(TransactionError::malformed(
                self.stage,
                format!("truncated signature at offset {}", self.pos),
            ));
        }
        let tag = self.buf[self.pos];
        if tag != DER_SEQUENCE_TAG {
            return Err(TransactionError::malformed(
                self.stage,
                format!("expected DER signature at offset {}, found 0x{:02x}", self.pos, tag),
            ));
        }
        let len = self.buf[self.pos + 1] as usize + 2;
        Ok(Signature::from_bytes(self.take(len)?.to_vec()))
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Header and payload only. These are the bytes that get signed.
pub fn serialize_unsigned(tx: &Transaction) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(HEADER_LENGTH + MAX_VENDOR_FIELD_LENGTH);
    write_header(&mut buf, tx)?;
    write_payload(&mut buf, &tx.asset)?;
    trace!(tx_type = %tx.transaction_type(), len = buf.len(), "serialized unsigned transaction");
    Ok(buf)
}

/// The complete wire form, signatures included.
pub fn serialize(tx: &Transaction) -> Result<Vec<u8>> {
    let mut buf = serialize_unsigned(tx)?;
    write_signatures(&mut buf, tx)?;
    Ok(buf)
}

pub fn serialize_hex(tx: &Transaction) -> Result<String> {
    Ok(hex::encode(serialize(tx)?))
}

fn write_header(buf: &mut Vec<u8>, tx: &Transaction) -> Result<()> {
    let vendor_field = tx.vendor_field.as_deref().unwrap_or("").as_bytes();
    if vendor_field.len() > MAX_VENDOR_FIELD_LENGTH {
        return Err(TransactionError::malformed(
            Stage::Header,
            format!(
                "vendor field is {} bytes, max {}",
                vendor_field.len(),
                MAX_VENDOR_FIELD_LENGTH
            ),
        ));
    }

    buf.push(HEADER_MARKER);
    buf.push(tx.version);
    buf.push(tx.network);
    buf.extend_from_slice(&tx.type_group.to_le_bytes());
    buf.extend_from_slice(&tx.transaction_type().code().to_le_bytes());
    buf.extend_from_slice(&tx.nonce.to_le_bytes());
    buf.extend_from_slice(tx.sender_public_key.as_bytes());
    buf.extend_from_slice(&tx.fee.to_le_bytes());
    buf.push(vendor_field.len() as u8);
    buf.extend_from_slice(vendor_field);
    Ok(())
}

fn count_prefix(len: usize, max: usize, what: &str) -> Result<()> {
    if len > max {
        return Err(TransactionError::malformed(
            Stage::Payload,
            format!("{} has {} entries, max {}", what, len, max),
        ));
    }
    Ok(())
}

fn write_payload(buf: &mut Vec<u8>, asset: &Asset) -> Result<()> {
    match asset {
        Asset::Transfer(transfer) => {
            buf.extend_from_slice(&transfer.amount.to_le_bytes());
            buf.extend_from_slice(&transfer.expiration.to_le_bytes());
            buf.extend_from_slice(&transfer.recipient.to_wire_bytes());
        }
        Asset::SecondSignatureRegistration(asset) => {
            buf.extend_from_slice(asset.public_key.as_bytes());
        }
        Asset::DelegateRegistration(delegate) => {
            let username = delegate.username.as_bytes();
            count_prefix(username.len(), MAX_USERNAME_LENGTH, "username")?;
            buf.push(username.len() as u8);
            buf.extend_from_slice(username);
        }
        Asset::Vote(votes) => {
            count_prefix(votes.len(), u8::MAX as usize, "vote list")?;
            buf.push(votes.len() as u8);
            for vote in votes {
                buf.push(vote.sign.to_byte());
                buf.extend_from_slice(vote.delegate_public_key.as_bytes());
            }
        }
        Asset::MultiSignatureRegistration(multi) => {
            count_prefix(multi.public_keys.len(), u8::MAX as usize, "participant list")?;
            buf.push(multi.min);
            buf.push(multi.public_keys.len() as u8);
            for key in &multi.public_keys {
                buf.extend_from_slice(key.as_bytes());
            }
        }
        Asset::Ipfs(multihash) => {
            let bytes = multihash.as_bytes();
            if bytes.len() < 2 || bytes[1] as usize != bytes.len() - 2 {
                return Err(TransactionError::malformed(
                    Stage::Payload,
                    "multihash length byte does not match digest",
                ));
            }
            buf.extend_from_slice(bytes);
        }
        Asset::MultiPayment(payments) => {
            count_prefix(payments.len(), u16::MAX as usize, "payment list")?;
            buf.extend_from_slice(&(payments.len() as u16).to_le_bytes());
            for payment in payments {
                buf.extend_from_slice(&payment.amount.to_le_bytes());
                buf.extend_from_slice(&payment.recipient.to_wire_bytes());
            }
        }
        Asset::DelegateResignation | Asset::HtlcLock | Asset::HtlcClaim | Asset::HtlcRefund => {
            return Err(TransactionError::UnsupportedVariant {
                stage: Stage::Payload,
                tx_type: asset.transaction_type(),
            });
        }
    }
    Ok(())
}

fn check_der(signature: &Signature, slot: &str) -> Result<()> {
    let bytes = signature.as_bytes();
    if bytes.len() < 2 || bytes[0] != DER_SEQUENCE_TAG || bytes[1] as usize + 2 != bytes.len() {
        return Err(TransactionError::malformed(
            Stage::Signatures,
            format!("{} signature is not DER framed", slot),
        ));
    }
    Ok(())
}

fn write_signatures(buf: &mut Vec<u8>, tx: &Transaction) -> Result<()> {
    match (&tx.signature, &tx.second_signature) {
        (Some(primary), second) => {
            check_der(primary, "primary")?;
            buf.extend_from_slice(primary.as_bytes());
            if let Some(second) = second {
                check_der(second, "second")?;
                buf.extend_from_slice(second.as_bytes());
            }
        }
        (None, Some(_)) => {
            return Err(TransactionError::malformed(
                Stage::Signatures,
                "second signature without a primary signature",
            ));
        }
        (None, None) => {}
    }

    if !tx.signatures.is_empty() {
        buf.push(MULTI_SIGNATURE_MARKER);
        for (i, signature) in tx.signatures.iter().enumerate() {
            check_der(signature, &format!("multi #{}", i))?;
            buf.extend_from_slice(signature.as_bytes());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Parses a complete wire-form transaction. The id is left uncomputed.
pub fn deserialize(bytes: &[u8]) -> Result<Transaction> {
    let mut reader = Reader::new(bytes);

    // Header.
    let marker = reader.u8()?;
    if marker != HEADER_MARKER {
        return Err(TransactionError::malformed(
            Stage::Header,
            format!("expected marker {:#04x}, found {:#04x}", HEADER_MARKER, marker),
        ));
    }
    let version = reader.u8()?;
    let network = reader.u8()?;
    let type_group = reader.u32()?;
    let code = reader.u16()?;
    let tx_type = TransactionType::from_code(code).ok_or_else(|| {
        TransactionError::malformed(Stage::Header, format!("unknown transaction type {}", code))
    })?;
    let nonce = reader.u64()?;
    let sender_public_key = reader.public_key()?;
    let fee = reader.u64()?;
    let vendor_len = reader.u8()? as usize;
    let vendor_field = match vendor_len {
        0 => None,
        n => Some(reader.utf8(n, "vendor field")?),
    };

    // Payload.
    reader.stage = Stage::Payload;
    let asset = read_payload(&mut reader, tx_type)?;

    // Signatures.
    reader.stage = Stage::Signatures;
    let (signature, second_signature, signatures) = read_signatures(&mut reader)?;

    debug!(
        tx_type = %tx_type,
        len = bytes.len(),
        multi_signatures = signatures.len(),
        "deserialized transaction"
    );

    Ok(Transaction {
        version,
        network,
        type_group,
        nonce,
        sender_public_key,
        fee,
        vendor_field,
        asset,
        signature,
        second_signature,
        signatures,
        id: OnceLock::new(),
    })
}

/// Boundary form: the wire bytes as hex text.
pub fn deserialize_hex(hex_str: &str) -> Result<Transaction> {
    let bytes = hex_decode(hex_str)
        .map_err(|e| TransactionError::malformed(Stage::Header, e.to_string()))?;
    deserialize(&bytes)
}

fn read_payload(reader: &mut Reader<'_>, tx_type: TransactionType) -> Result<Asset> {
    let asset = match tx_type {
        TransactionType::Transfer => Asset::Transfer(TransferAsset {
            amount: reader.u64()?,
            expiration: reader.u32()?,
            recipient: reader.address()?,
        }),
        TransactionType::SecondSignatureRegistration => {
            Asset::SecondSignatureRegistration(SecondSignatureAsset {
                public_key: reader.public_key()?,
            })
        }
        TransactionType::DelegateRegistration => {
            let len = reader.u8()? as usize;
            Asset::DelegateRegistration(DelegateAsset {
                username: reader.utf8(len, "username")?,
            })
        }
        TransactionType::Vote => {
            let count = reader.u8()? as usize;
            let mut votes = Vec::with_capacity(count);
            for _ in 0..count {
                let byte = reader.u8()?;
                let sign = VoteSign::from_byte(byte).ok_or_else(|| {
                    TransactionError::malformed(
                        Stage::Payload,
                        format!("vote sign byte {:#04x}", byte),
                    )
                })?;
                votes.push(Vote {
                    sign,
                    delegate_public_key: reader.public_key()?,
                });
            }
            Asset::Vote(votes)
        }
        TransactionType::MultiSignatureRegistration => {
            let min = reader.u8()?;
            let count = reader.u8()? as usize;
            let mut public_keys = Vec::with_capacity(count);
            for _ in 0..count {
                public_keys.push(reader.public_key()?);
            }
            Asset::MultiSignatureRegistration(MultiSignatureAsset { min, public_keys })
        }
        TransactionType::Ipfs => {
            let function = reader.u8()?;
            let len = reader.u8()?;
            let digest = reader.take(len as usize)?;
            let mut bytes = Vec::with_capacity(2 + digest.len());
            bytes.push(function);
            bytes.push(len);
            bytes.extend_from_slice(digest);
            Asset::Ipfs(Multihash::from_bytes(bytes))
        }
        TransactionType::MultiPayment => {
            let count = reader.u16()? as usize;
            let mut payments = Vec::with_capacity(count.min(reader.remaining() / 29 + 1));
            for _ in 0..count {
                payments.push(Payment {
                    amount: reader.u64()?,
                    recipient: reader.address()?,
                });
            }
            Asset::MultiPayment(payments)
        }
        TransactionType::DelegateResignation
        | TransactionType::HtlcLock
        | TransactionType::HtlcClaim
        | TransactionType::HtlcRefund => {
            return Err(TransactionError::UnsupportedVariant {
                stage: Stage::Payload,
                tx_type,
            });
        }
    };
    Ok(asset)
}

type SignatureBlock = (Option<Signature>, Option<Signature>, Vec<Signature>);

fn read_signatures(reader: &mut Reader<'_>) -> Result<SignatureBlock> {
    let mut primary = None;
    let mut second = None;
    let mut multi = Vec::new();

    if reader.peek().is_some_and(|b| b != MULTI_SIGNATURE_MARKER) {
        primary = Some(reader.der_signature()?);
    }
    if reader.peek().is_some_and(|b| b != MULTI_SIGNATURE_MARKER) {
        second = Some(reader.der_signature()?);
    }
    if !reader.is_empty() {
        // Only the marker can be left at this point.
        reader.u8()?;
        if reader.is_empty() {
            return Err(TransactionError::malformed(
                Stage::Signatures,
                "multi-signature marker with no signatures",
            ));
        }
        while !reader.is_empty() {
            multi.push(reader.der_signature()?);
        }
    }
    Ok((primary, second, multi))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
