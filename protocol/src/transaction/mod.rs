//! # Transaction Module
//!
//! Construction, wire encoding, signing and verification of Ark core
//! transactions. Every transfer, vote and registration is a [`Transaction`]
//! whose type is fixed by its [`Asset`] variant.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — TransactionType, Asset and the per-type payload structs
//! codec.rs        — packed little-endian wire format, both directions
//! builder.rs      — Transaction, TransactionBuilder and the build_* helpers
//! signing.rs      — primary, second and multi-signature signing
//! verification.rs — signature checks for each slot
//! error.rs        — TransactionError with the failing codec Stage
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] assembles an unsigned draft.
//! 2. **Sign**: [`sign_transaction`], then optionally
//!    [`second_sign_transaction`] or [`multi_sign_transaction`]. The
//!    `build_*` functions do both steps from passphrases.
//! 3. **Encode**: [`Transaction::to_bytes`] / [`Transaction::to_hex`].
//! 4. **Verify**: [`verify_transaction`] and friends on the receiving side.
//!
//! ## Design Decisions
//!
//! - The id is `sha256` of the full wire bytes, computed lazily and cached.
//! - All amounts are `u64` in the smallest denomination.
//! - Resignation and HTLC types are recognised but their payloads are not
//!   implemented; both directions of the codec report
//!   [`TransactionError::UnsupportedVariant`] for them.

pub mod builder;
pub mod codec;
pub mod error;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{
    build_delegate_registration, build_ipfs, build_multi_payment,
    build_multi_signature_registration, build_second_signature_registration, build_transfer,
    build_vote, Transaction, TransactionBuilder,
};
pub use codec::{deserialize, deserialize_hex, serialize, serialize_hex, serialize_unsigned};
pub use error::{SignatureSlot, Stage, TransactionError};
pub use signing::{multi_sign_transaction, second_sign_transaction, sign_transaction};
pub use types::{
    Asset, DelegateAsset, MultiSignatureAsset, Multihash, Payment, SecondSignatureAsset,
    TransactionType, TransferAsset, Vote, VoteSign,
};
pub use verification::{verify_multi_signatures, verify_second_signature, verify_transaction};
