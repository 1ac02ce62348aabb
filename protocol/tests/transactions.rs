//! Integration tests for the transaction lifecycle.
//!
//! Each test builds a transaction from passphrases, pushes it through the
//! hex wire form and checks that the receiving side sees exactly what was
//! sent and that every signature still verifies.

use std::sync::{Arc, Once};
use std::thread;

use tracing_subscriber::EnvFilter;

use ark_protocol::config::{Network, ProtocolConfig};
use ark_protocol::crypto::keys::{PrivateKey, PublicKey};
use ark_protocol::identity::Address;
use ark_protocol::transaction::{
    build_delegate_registration, build_ipfs, build_multi_payment,
    build_multi_signature_registration, build_second_signature_registration, build_transfer,
    build_vote, multi_sign_transaction, Asset, DelegateAsset, MultiSignatureAsset, Multihash,
    Payment, Stage, Transaction, TransactionBuilder, TransactionError, TransactionType, Vote,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const PASSPHRASE: &str = "This is a top secret passphrase";
const SECOND_PASSPHRASE: &str = "This is a top secret second passphrase";
const RECIPIENT: &str = "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25";
const DELEGATE: &str = "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192";

static LOGGING: Once = Once::new();

/// Routes library logs to the test harness. `RUST_LOG=ark_protocol=trace`
/// shows the codec at work.
fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Sends a transaction over the hex wire form and returns what arrives.
fn over_the_wire(tx: &Transaction) -> Transaction {
    init_logging();
    let wire = tx.to_hex().expect("serialize");
    Transaction::from_hex(&wire).expect("deserialize")
}

fn transfer_draft() -> Transaction {
    TransactionBuilder::transfer(133_380_000_000, RECIPIENT.parse().unwrap())
        .nonce(5)
        .vendor_field("This is a transaction from Go")
        .build()
}

fn second_public_key() -> PublicKey {
    PublicKey::from_passphrase(SECOND_PASSPHRASE).unwrap()
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[test]
fn transfer_with_passphrase() {
    let tx = build_transfer(transfer_draft(), PASSPHRASE, None).unwrap();
    assert!(tx.verify());

    let received = over_the_wire(&tx);
    assert_eq!(received, tx);
    assert!(received.verify());

    let transfer = received.transfer().unwrap();
    assert_eq!(transfer.amount, 133_380_000_000);
    assert_eq!(transfer.recipient.to_string(), RECIPIENT);
    assert_eq!(received.nonce(), 5);
    assert_eq!(received.vendor_field(), Some("This is a transaction from Go"));
    assert_eq!(received.id().unwrap(), tx.id().unwrap());
}

#[test]
fn transfer_with_second_passphrase() {
    let tx = build_transfer(transfer_draft(), PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    assert!(tx.verify());
    assert!(tx.second_verify(&second_public_key()));

    let received = over_the_wire(&tx);
    assert!(received.verify());
    assert!(received.second_verify(&second_public_key()));
    assert!(!received.second_verify(&PublicKey::from_passphrase(PASSPHRASE).unwrap()));
}

#[test]
fn transfer_signature_is_deterministic() {
    let a = build_transfer(transfer_draft(), PASSPHRASE, None).unwrap();
    let b = build_transfer(transfer_draft(), PASSPHRASE, None).unwrap();
    assert_eq!(a.to_hex().unwrap(), b.to_hex().unwrap());
    assert_eq!(a.id().unwrap(), b.id().unwrap());
}

#[test]
fn transfer_on_mainnet_config() {
    let config = ProtocolConfig::for_network(Network::Mainnet);
    let draft = TransactionBuilder::with_config(
        Asset::Transfer(ark_protocol::transaction::TransferAsset {
            amount: 1,
            expiration: 0,
            recipient: RECIPIENT.parse().unwrap(),
        }),
        &config,
    )
    .build();
    let tx = build_transfer(draft, PASSPHRASE, None).unwrap();
    let received = over_the_wire(&tx);
    assert_eq!(received.network(), 0x17);
    assert_eq!(
        Address::from_public_key(received.sender_public_key(), received.network()),
        Address::from_passphrase(PASSPHRASE, Network::Mainnet).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Registrations and votes
// ---------------------------------------------------------------------------

#[test]
fn second_signature_registration() {
    let draft = TransactionBuilder::new(Asset::Vote(vec![])).nonce(5).build();
    let tx = build_second_signature_registration(draft, PASSPHRASE, SECOND_PASSPHRASE).unwrap();
    assert!(tx.verify());

    let received = over_the_wire(&tx);
    assert_eq!(received.transaction_type(), TransactionType::SecondSignatureRegistration);
    assert_eq!(
        received.second_signature_registration().unwrap().public_key,
        second_public_key()
    );
    assert!(received.verify());
}

#[test]
fn delegate_registration_with_passphrase() {
    let draft = TransactionBuilder::new(Asset::DelegateRegistration(DelegateAsset {
        username: "polopolo".into(),
    }))
    .nonce(5)
    .build();
    let tx = build_delegate_registration(
        draft,
        "lumber desk thought industry island man slow vendor pact fragile enact season",
        None,
    )
    .unwrap();
    assert!(tx.verify());
    let received = over_the_wire(&tx);
    assert_eq!(received.delegate_registration().unwrap().username, "polopolo");
    assert!(received.verify());
}

#[test]
fn delegate_registration_with_second_passphrase() {
    let draft = TransactionBuilder::new(Asset::DelegateRegistration(DelegateAsset {
        username: "polopolo".into(),
    }))
    .nonce(5)
    .build();
    let tx = build_delegate_registration(draft, PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    let received = over_the_wire(&tx);
    assert!(received.verify());
    assert!(received.second_verify(&second_public_key()));
}

#[test]
fn vote_with_passphrase() {
    let vote: Vote = format!("+{}", DELEGATE).parse().unwrap();
    let draft = TransactionBuilder::new(Asset::Vote(vec![vote])).nonce(5).build();
    let tx = build_vote(draft, PASSPHRASE, None).unwrap();
    assert!(tx.verify());

    let received = over_the_wire(&tx);
    let votes = received.vote().unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].to_string(), format!("+{}", DELEGATE));
    assert!(received.verify());
}

#[test]
fn vote_with_second_passphrase() {
    let vote: Vote = format!("+{}", DELEGATE).parse().unwrap();
    let draft = TransactionBuilder::new(Asset::Vote(vec![vote])).nonce(5).build();
    let tx = build_vote(draft, PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    let received = over_the_wire(&tx);
    assert!(received.verify());
    assert!(received.second_verify(&second_public_key()));
}

#[test]
fn multi_signature_registration_with_passphrase() {
    let public_keys: Vec<PublicKey> = [
        "03a02b9d5fdd1307c2ee4652ba54d492d1fd11a7d1bb3f3a44c4a05e79f19de933",
        "03b02b9d5fdd1307c2ee4652ba54d492d1fd11a7d1bb3f3a44c4a05e79f19de933",
        "03c02b9d5fdd1307c2ee4652ba54d492d1fd11a7d1bb3f3a44c4a05e79f19de933",
    ]
    .iter()
    .map(|k| PublicKey::from_hex(k).unwrap())
    .collect();
    let draft = TransactionBuilder::new(Asset::MultiSignatureRegistration(MultiSignatureAsset {
        min: 2,
        public_keys: public_keys.clone(),
    }))
    .nonce(5)
    .build();
    let tx = build_multi_signature_registration(draft, PASSPHRASE, None).unwrap();
    assert!(tx.verify());

    let received = over_the_wire(&tx);
    let asset = received.multi_signature_registration().unwrap();
    assert_eq!(asset.min, 2);
    assert_eq!(asset.public_keys, public_keys);
    assert!(received.verify());
}

#[test]
fn multi_signature_participants_sign_and_verify() {
    let participants: Vec<PrivateKey> = ["alpha", "beta", "gamma"]
        .iter()
        .map(|p| PrivateKey::from_passphrase(p).unwrap())
        .collect();
    let draft = TransactionBuilder::new(Asset::MultiSignatureRegistration(MultiSignatureAsset {
        min: 2,
        public_keys: participants.iter().map(PrivateKey::public_key).collect(),
    }))
    .build();
    let mut tx = build_multi_signature_registration(draft, PASSPHRASE, None).unwrap();
    multi_sign_transaction(&mut tx, &participants[2]).unwrap();
    multi_sign_transaction(&mut tx, &participants[0]).unwrap();

    let received = over_the_wire(&tx);
    assert_eq!(received.signatures().len(), 2);
    assert!(received.verify());
    assert!(received.verify_multi_signatures());
}

// ---------------------------------------------------------------------------
// Ipfs and multi-payment
// ---------------------------------------------------------------------------

#[test]
fn ipfs_with_passphrase() {
    let multihash =
        Multihash::from_base58("QmR45FmbVVrixReBwJkhEKde2qwHYaQzGxu4ZoDeswuF9w").unwrap();
    let draft = TransactionBuilder::new(Asset::Ipfs(multihash.clone())).nonce(5).build();
    let tx = build_ipfs(draft, PASSPHRASE, None).unwrap();
    let received = over_the_wire(&tx);
    assert_eq!(received.ipfs().unwrap(), &multihash);
    assert!(received.verify());
}

#[test]
fn multi_payment_with_second_passphrase() {
    let recipient: Address = RECIPIENT.parse().unwrap();
    let payments: Vec<Payment> = (1..=3)
        .map(|i| Payment {
            amount: i * 1_000,
            recipient,
        })
        .collect();
    let draft = TransactionBuilder::new(Asset::MultiPayment(payments.clone()))
        .nonce(5)
        .build();
    let tx = build_multi_payment(draft, PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    let received = over_the_wire(&tx);
    assert_eq!(received.multi_payment().unwrap(), payments.as_slice());
    assert!(received.verify());
    assert!(received.second_verify(&second_public_key()));
}

// ---------------------------------------------------------------------------
// Identity and failure modes
// ---------------------------------------------------------------------------

#[test]
fn id_is_shared_across_threads() {
    let tx = Arc::new(build_transfer(transfer_draft(), PASSPHRASE, None).unwrap());
    let expected = tx.compute_id().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tx = Arc::clone(&tx);
            thread::spawn(move || tx.id().unwrap().to_string())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn tampered_wire_bytes_fail_verification() {
    let tx = build_transfer(transfer_draft(), PASSPHRASE, None).unwrap();
    let mut bytes = tx.to_bytes().unwrap();
    // Last byte of the amount.
    bytes[59 + 29 + 7] ^= 0x01;
    let received = Transaction::from_bytes(&bytes).unwrap();
    assert!(!received.verify());
}

#[test]
fn truncated_transaction_is_rejected() {
    let tx = build_transfer(transfer_draft(), PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    let bytes = tx.to_bytes().unwrap();
    for len in [0, 1, 58, 100, bytes.len() - 1] {
        let err = Transaction::from_bytes(&bytes[..len]).unwrap_err();
        assert!(
            matches!(err, TransactionError::MalformedInput { .. }),
            "length {} gave {:?}",
            len,
            err
        );
    }
}

#[test]
fn unsupported_variant_is_an_error() {
    let draft = TransactionBuilder::new(Asset::HtlcLock).build();
    let mut tx = draft.clone();
    let key = PrivateKey::from_passphrase(PASSPHRASE).unwrap();
    assert_eq!(
        ark_protocol::transaction::sign_transaction(&mut tx, &key).unwrap_err(),
        TransactionError::UnsupportedVariant {
            stage: Stage::Payload,
            tx_type: TransactionType::HtlcLock,
        }
    );
    assert!(draft.to_bytes().is_err());
}

#[test]
fn json_roundtrip_preserves_everything() {
    let tx = build_transfer(transfer_draft(), PASSPHRASE, Some(SECOND_PASSPHRASE)).unwrap();
    let back = Transaction::from_json(&tx.to_json().unwrap()).unwrap();
    assert_eq!(back, tx);
    assert_eq!(back.id().unwrap(), tx.id().unwrap());
    assert!(back.second_verify(&second_public_key()));
}
