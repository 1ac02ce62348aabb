//! # Identity
//!
//! Who signed a transaction and where value is sent: addresses derived from
//! secp256k1 public keys, in both their wire and text forms.

pub mod address;

pub use address::{validate_address, Address, AddressError};
