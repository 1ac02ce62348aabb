//! # Cryptographic Primitives
//!
//! Everything the transaction layer needs from the outside world, wrapped in
//! small pure functions so the codec never touches a curve library directly:
//!
//! - **encoding** — hex, base-58 and base-58-check byte transforms.
//! - **hash** — SHA-256, double SHA-256 and RIPEMD-160.
//! - **keys** — passphrase → secp256k1 private key → compressed public key.
//! - **signatures** — ECDSA over SHA-256, DER encoded.
//! - **message** — signed free-text messages.
//!
//! Nothing here is hand-rolled. `k256`, `sha2`, `ripemd` and `bs58` do the
//! actual work; this module only fixes the conventions.

pub mod encoding;
pub mod hash;
pub mod keys;
pub mod message;
pub mod signatures;

pub use encoding::EncodingError;
pub use hash::{double_sha256, ripemd160, sha256};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use message::{MessageError, SignedMessage};
pub use signatures::{sign, verify, Signature, SignatureError};
