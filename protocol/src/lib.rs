// Copyright (c) 2026 Ark Ecosystem. MIT License.
// See LICENSE for details.

//! # Ark Protocol — Core Library
//!
//! Offline transaction tooling for Ark-style ledgers: build a transaction,
//! encode it to the packed wire format, sign it with secp256k1 keys derived
//! from passphrases, and verify it on the other side.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants, network presets and builder defaults.
//! - **crypto** — Hashing, base-58, keys, ECDSA signatures, signed messages.
//! - **identity** — Addresses in their text and wire forms.
//! - **transaction** — The transaction model, codec, builder and signing.
//!
//! ## Example
//!
//! ```rust
//! use ark_protocol::transaction::{build_transfer, Transaction, TransactionBuilder};
//!
//! let recipient = "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25".parse().unwrap();
//! let draft = TransactionBuilder::transfer(133_380_000_000, recipient)
//!     .nonce(5)
//!     .vendor_field("This is a transaction from Go")
//!     .build();
//! let tx = build_transfer(draft, "This is a top secret passphrase", None).unwrap();
//!
//! let wire = tx.to_hex().unwrap();
//! let received = Transaction::from_hex(&wire).unwrap();
//! assert!(received.verify());
//! assert_eq!(received.id().unwrap(), tx.id().unwrap());
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
