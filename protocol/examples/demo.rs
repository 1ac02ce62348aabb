//! Terminal walkthrough of the transaction lifecycle.
//!
//! Derives an identity from a passphrase, builds and signs a transfer with a
//! second passphrase, ships it through the hex wire form, and verifies it on
//! the receiving side.
//!
//! Run with:
//!   RUST_LOG=ark_protocol=debug cargo run --example demo

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use ark_protocol::config::Network;
use ark_protocol::crypto::keys::{PrivateKey, PublicKey};
use ark_protocol::identity::Address;
use ark_protocol::transaction::{build_transfer, Transaction, TransactionBuilder};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(title: &str) {
    println!();
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn ok(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, started: Instant) {
    let ms = started.elapsed().as_secs_f64() * 1_000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let passphrase = "This is a top secret passphrase";
    let second_passphrase = "This is a top secret second passphrase";

    section("1. Identity");
    let started = Instant::now();
    let key = PrivateKey::from_passphrase(passphrase)?;
    timing("derive", started);
    field("public key", key.public_key());
    field("address", Address::from_passphrase(passphrase, Network::Devnet)?);
    field("wif", key.to_wif(Network::Devnet));

    section("2. Build and sign");
    let draft = TransactionBuilder::transfer(133_380_000_000, "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25".parse()?)
        .nonce(5)
        .fee(10_000_000)
        .vendor_field("This is a transaction from Go")
        .build();
    let started = Instant::now();
    let tx = build_transfer(draft, passphrase, Some(second_passphrase))?;
    timing("sign", started);
    field("id", tx.id()?);

    section("3. Wire");
    let wire = tx.to_hex()?;
    field("bytes", wire.len() / 2);
    println!("{DIM}{CYAN}  >> {wire}{RESET}");

    section("4. Receive and verify");
    let received = Transaction::from_hex(&wire)?;
    if received.verify() {
        ok("primary signature");
    }
    if received.second_verify(&PublicKey::from_passphrase(second_passphrase)?) {
        ok("second signature");
    }
    if received.id()? == tx.id()? {
        ok("id matches");
    }
    println!();
    Ok(())
}
