//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] produces an unsigned draft [`Transaction`]
//! with header defaults taken from a [`ProtocolConfig`]. The `build_*`
//! functions at the bottom of this file take such a draft plus passphrases
//! and return a fully signed transaction.
//!
//! The builder does not sign. That happens in [`super::signing`], so
//! construction stays testable without key material.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec;
use super::error::{SignatureSlot, Stage, TransactionError};
use super::signing::{second_sign_transaction, sign_transaction};
use super::types::{
    Asset, DelegateAsset, MultiSignatureAsset, Multihash, Payment, SecondSignatureAsset,
    TransactionType, TransferAsset, Vote,
};
use crate::config::{ProtocolConfig, PUBLIC_KEY_LENGTH};
use crate::crypto::hash::sha256;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::crypto::signatures::Signature;
use crate::identity::Address;

type Result<T> = std::result::Result<T, TransactionError>;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An Ark core transaction.
///
/// The type is not a field: it is read off [`Transaction::asset`], so a
/// transaction can never claim one type and carry another's payload.
///
/// The `id` is `hex(sha256(wire bytes))`, signatures included. It is
/// computed on first request and cached. Header fields are fixed once the
/// builder is done; the only mutations left are the signature setters and
/// the signing functions, and all of them clear the cache.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub(crate) version: u8,

    /// Address version byte of the target network.
    pub(crate) network: u8,

    pub(crate) type_group: u32,

    /// Per-sender sequence number.
    pub(crate) nonce: u64,

    /// All zeros until the transaction is signed.
    pub(crate) sender_public_key: PublicKey,

    pub(crate) fee: u64,

    /// Free text, at most 255 UTF-8 bytes. Empty and `None` are the same
    /// thing on the wire.
    pub(crate) vendor_field: Option<String>,

    pub(crate) asset: Asset,

    pub(crate) signature: Option<Signature>,

    /// Present only when the sender has registered a second key.
    pub(crate) second_signature: Option<Signature>,

    /// Multi-signature list, in participant order.
    pub(crate) signatures: Vec<Signature>,

    pub(crate) id: OnceLock<String>,
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.network == other.network
            && self.type_group == other.type_group
            && self.nonce == other.nonce
            && self.sender_public_key == other.sender_public_key
            && self.fee == other.fee
            && self.vendor_field() == other.vendor_field()
            && self.asset == other.asset
            && self.signature == other.signature
            && self.second_signature == other.second_signature
            && self.signatures == other.signatures
    }
}

impl Eq for Transaction {}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.asset.transaction_type()
    }

    /// The vendor field with the empty string folded into `None`.
    pub fn vendor_field(&self) -> Option<&str> {
        self.vendor_field.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    // ---- Field access ----

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn network(&self) -> u8 {
        self.network
    }

    pub fn type_group(&self) -> u32 {
        self.type_group
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn sender_public_key(&self) -> &PublicKey {
        &self.sender_public_key
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn second_signature(&self) -> Option<&Signature> {
        self.second_signature.as_ref()
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Attaches a primary signature produced elsewhere, e.g. by a hardware
    /// signer. Nothing is verified here; use [`Transaction::verify`].
    pub fn set_signature(&mut self, signature: Option<Signature>) {
        self.signature = signature;
        self.reset_id();
    }

    pub fn set_second_signature(&mut self, signature: Option<Signature>) {
        self.second_signature = signature;
        self.reset_id();
    }

    pub fn set_signatures(&mut self, signatures: Vec<Signature>) {
        self.signatures = signatures;
        self.reset_id();
    }

    /// Returns the transaction id, computing and caching it on first use.
    ///
    /// Safe to call from several threads at once; they all observe the same
    /// string.
    pub fn id(&self) -> Result<&str> {
        if let Some(id) = self.id.get() {
            return Ok(id);
        }
        let computed = self.compute_id()?;
        Ok(self.id.get_or_init(|| computed))
    }

    /// Computes the id from the current field values without touching the
    /// cache.
    pub fn compute_id(&self) -> Result<String> {
        Ok(hex::encode(sha256(&self.to_bytes()?)))
    }

    pub(crate) fn reset_id(&mut self) {
        self.id.take();
    }

    // ---- Wire form ----

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::serialize(self)
    }

    pub fn to_hex(&self) -> Result<String> {
        codec::serialize_hex(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::deserialize(bytes)
    }

    pub fn from_hex(hex_str: &str) -> Result<Self> {
        codec::deserialize_hex(hex_str)
    }

    /// Header and payload, no signatures. What the primary key signs.
    pub fn to_signable_bytes(&self) -> Result<Vec<u8>> {
        codec::serialize_unsigned(self)
    }

    /// Signable bytes followed by the primary signature. What the second key
    /// signs.
    pub fn to_second_signable_bytes(&self) -> Result<Vec<u8>> {
        let primary = self
            .signature
            .as_ref()
            .ok_or(TransactionError::MissingSignature {
                slot: SignatureSlot::Primary,
            })?;
        let mut bytes = self.to_signable_bytes()?;
        bytes.extend_from_slice(primary.as_bytes());
        Ok(bytes)
    }

    // ---- Typed asset access ----

    fn mismatch(&self, expected: TransactionType) -> TransactionError {
        TransactionError::AssetMismatch {
            expected,
            found: self.transaction_type(),
        }
    }

    pub fn transfer(&self) -> Result<&TransferAsset> {
        match &self.asset {
            Asset::Transfer(asset) => Ok(asset),
            _ => Err(self.mismatch(TransactionType::Transfer)),
        }
    }

    pub fn second_signature_registration(&self) -> Result<&SecondSignatureAsset> {
        match &self.asset {
            Asset::SecondSignatureRegistration(asset) => Ok(asset),
            _ => Err(self.mismatch(TransactionType::SecondSignatureRegistration)),
        }
    }

    pub fn delegate_registration(&self) -> Result<&DelegateAsset> {
        match &self.asset {
            Asset::DelegateRegistration(asset) => Ok(asset),
            _ => Err(self.mismatch(TransactionType::DelegateRegistration)),
        }
    }

    pub fn vote(&self) -> Result<&[Vote]> {
        match &self.asset {
            Asset::Vote(votes) => Ok(votes),
            _ => Err(self.mismatch(TransactionType::Vote)),
        }
    }

    pub fn multi_signature_registration(&self) -> Result<&MultiSignatureAsset> {
        match &self.asset {
            Asset::MultiSignatureRegistration(asset) => Ok(asset),
            _ => Err(self.mismatch(TransactionType::MultiSignatureRegistration)),
        }
    }

    pub fn ipfs(&self) -> Result<&Multihash> {
        match &self.asset {
            Asset::Ipfs(multihash) => Ok(multihash),
            _ => Err(self.mismatch(TransactionType::Ipfs)),
        }
    }

    pub fn multi_payment(&self) -> Result<&[Payment]> {
        match &self.asset {
            Asset::MultiPayment(payments) => Ok(payments),
            _ => Err(self.mismatch(TransactionType::MultiPayment)),
        }
    }

    // ---- JSON ----

    /// JSON form with the id and numeric `type` included.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&TransactionJson::try_from(self)?)?)
    }

    /// Parses the JSON form. If an `id` is present it must match the id
    /// recomputed from the parsed fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let dto: TransactionJson = serde_json::from_str(json)?;
        Transaction::try_from(dto)
    }
}

// ---------------------------------------------------------------------------
// JSON representation
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    version: u8,
    network: u8,
    type_group: u32,
    #[serde(rename = "type")]
    tx_type: u16,
    nonce: u64,
    sender_public_key: PublicKey,
    fee: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vendor_field: Option<String>,
    asset: Asset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second_signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    signatures: Vec<Signature>,
}

impl TryFrom<&Transaction> for TransactionJson {
    type Error = TransactionError;

    fn try_from(tx: &Transaction) -> Result<Self> {
        Ok(Self {
            id: Some(tx.id()?.to_string()),
            version: tx.version,
            network: tx.network,
            type_group: tx.type_group,
            tx_type: tx.transaction_type().code(),
            nonce: tx.nonce,
            sender_public_key: tx.sender_public_key,
            fee: tx.fee,
            vendor_field: tx.vendor_field().map(str::to_string),
            asset: tx.asset.clone(),
            signature: tx.signature.clone(),
            second_signature: tx.second_signature.clone(),
            signatures: tx.signatures.clone(),
        })
    }
}

impl TryFrom<TransactionJson> for Transaction {
    type Error = TransactionError;

    fn try_from(dto: TransactionJson) -> Result<Self> {
        let declared = TransactionType::from_code(dto.tx_type).ok_or_else(|| {
            TransactionError::malformed(
                Stage::Header,
                format!("unknown transaction type {}", dto.tx_type),
            )
        })?;
        let found = dto.asset.transaction_type();
        if declared != found {
            return Err(TransactionError::AssetMismatch {
                expected: declared,
                found,
            });
        }

        let tx = Transaction {
            version: dto.version,
            network: dto.network,
            type_group: dto.type_group,
            nonce: dto.nonce,
            sender_public_key: dto.sender_public_key,
            fee: dto.fee,
            vendor_field: dto.vendor_field.filter(|s| !s.is_empty()),
            asset: dto.asset,
            signature: dto.signature,
            second_signature: dto.second_signature,
            signatures: dto.signatures,
            id: OnceLock::new(),
        };

        let computed = tx.compute_id()?;
        if let Some(claimed) = dto.id {
            if claimed != computed {
                return Err(TransactionError::malformed(
                    Stage::Identity,
                    format!("id {} does not match contents ({})", claimed, computed),
                ));
            }
        }
        let _ = tx.id.set(computed);
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`] drafts.
///
/// # Usage
///
/// ```rust
/// use ark_protocol::transaction::TransactionBuilder;
///
/// let recipient = "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25".parse().unwrap();
/// let tx = TransactionBuilder::transfer(133_380_000_000, recipient)
///     .nonce(5)
///     .vendor_field("This is a transaction from Go")
///     .build();
/// assert!(!tx.is_signed());
/// ```
///
/// `version`, `network` and `type_group` default to the values in
/// [`ProtocolConfig::default`]. Use [`TransactionBuilder::with_config`] to
/// target another network.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    version: u8,
    network: u8,
    type_group: u32,
    nonce: u64,
    fee: u64,
    sender_public_key: Option<PublicKey>,
    vendor_field: Option<String>,
    asset: Asset,
}

impl TransactionBuilder {
    pub fn new(asset: Asset) -> Self {
        Self::with_config(asset, &ProtocolConfig::default())
    }

    pub fn with_config(asset: Asset, config: &ProtocolConfig) -> Self {
        Self {
            version: config.version,
            network: config.network.address_version(),
            type_group: config.type_group,
            nonce: 0,
            fee: 0,
            sender_public_key: None,
            vendor_field: None,
            asset,
        }
    }

    /// Shorthand for a transfer with no expiration.
    pub fn transfer(amount: u64, recipient: Address) -> Self {
        Self::new(Asset::Transfer(TransferAsset {
            amount,
            expiration: 0,
            recipient,
        }))
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Sets the network byte. This is the address version of the network.
    pub fn network(mut self, network: u8) -> Self {
        self.network = network;
        self
    }

    pub fn type_group(mut self, type_group: u32) -> Self {
        self.type_group = type_group;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Usually left unset; signing fills it in.
    pub fn sender_public_key(mut self, public_key: PublicKey) -> Self {
        self.sender_public_key = Some(public_key);
        self
    }

    pub fn vendor_field(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.vendor_field = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn asset(mut self, asset: Asset) -> Self {
        self.asset = asset;
        self
    }

    pub fn build(self) -> Transaction {
        Transaction {
            version: self.version,
            network: self.network,
            type_group: self.type_group,
            nonce: self.nonce,
            sender_public_key: self
                .sender_public_key
                .unwrap_or(PublicKey::from_bytes([0u8; PUBLIC_KEY_LENGTH])),
            fee: self.fee,
            vendor_field: self.vendor_field,
            asset: self.asset,
            signature: None,
            second_signature: None,
            signatures: Vec::new(),
            id: OnceLock::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

fn expect_type(draft: &Transaction, expected: TransactionType) -> Result<()> {
    let found = draft.transaction_type();
    if found != expected {
        return Err(TransactionError::AssetMismatch { expected, found });
    }
    Ok(())
}

/// Signs `draft` with the primary passphrase and, if given, the second one.
fn sign_with(
    mut draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    let key = PrivateKey::from_passphrase(passphrase)?;
    sign_transaction(&mut draft, &key)?;
    if let Some(second) = second_passphrase {
        let second_key = PrivateKey::from_passphrase(second)?;
        second_sign_transaction(&mut draft, &second_key)?;
    }
    debug!(
        tx_type = %draft.transaction_type(),
        second = second_passphrase.is_some(),
        "built transaction"
    );
    Ok(draft)
}

/// Signs a transfer draft.
pub fn build_transfer(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::Transfer)?;
    sign_with(draft, passphrase, second_passphrase)
}

/// Registers the key derived from `second_passphrase` as the sender's
/// second key. The transaction itself carries only the primary signature.
///
/// Whatever asset the draft holds is replaced.
pub fn build_second_signature_registration(
    mut draft: Transaction,
    passphrase: &str,
    second_passphrase: &str,
) -> Result<Transaction> {
    draft.asset = Asset::SecondSignatureRegistration(SecondSignatureAsset {
        public_key: PublicKey::from_passphrase(second_passphrase)?,
    });
    sign_with(draft, passphrase, None)
}

pub fn build_delegate_registration(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::DelegateRegistration)?;
    sign_with(draft, passphrase, second_passphrase)
}

pub fn build_vote(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::Vote)?;
    sign_with(draft, passphrase, second_passphrase)
}

/// Signs the registration with the sender's key. Participant signatures
/// are added afterwards with [`super::signing::multi_sign_transaction`].
pub fn build_multi_signature_registration(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::MultiSignatureRegistration)?;
    sign_with(draft, passphrase, second_passphrase)
}

pub fn build_ipfs(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::Ipfs)?;
    sign_with(draft, passphrase, second_passphrase)
}

pub fn build_multi_payment(
    draft: Transaction,
    passphrase: &str,
    second_passphrase: Option<&str>,
) -> Result<Transaction> {
    expect_type(&draft, TransactionType::MultiPayment)?;
    sign_with(draft, passphrase, second_passphrase)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::transaction::types::VoteSign;

    const RECIPIENT: &str = "AXoXnFi4z1Z6aFvjEYkDVCtBGW2PaRiM25";
    const PASSPHRASE: &str = "This is a top secret passphrase";

    fn sample_tx() -> Transaction {
        TransactionBuilder::transfer(1_000_000, RECIPIENT.parse().unwrap())
            .fee(100)
            .nonce(1)
            .build()
    }

    #[test]
    fn builder_defaults_come_from_config() {
        let tx = sample_tx();
        assert_eq!(tx.version, 2);
        assert_eq!(tx.type_group, 1);
        assert_eq!(tx.network, Network::Devnet.address_version());
        assert_eq!(tx.sender_public_key.as_bytes(), &[0u8; 33]);

        let mainnet = TransactionBuilder::with_config(
            Asset::Vote(vec![]),
            &ProtocolConfig::for_network(Network::Mainnet),
        )
        .build();
        assert_eq!(mainnet.network, 0x17);
    }

    #[test]
    fn builder_produces_deterministic_id() {
        let tx1 = sample_tx();
        let tx2 = sample_tx();
        assert_eq!(tx1.id().unwrap(), tx2.id().unwrap());
    }

    #[test]
    fn id_is_hex_encoded_64_chars() {
        let tx = sample_tx();
        let id = tx.id().unwrap();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn id_is_memoized() {
        let tx = sample_tx();
        let first = tx.id().unwrap() as *const str;
        let second = tx.id().unwrap() as *const str;
        assert_eq!(first, second, "second call must return the cached string");
        assert_eq!(tx.id().unwrap(), tx.compute_id().unwrap());
    }

    #[test]
    fn signature_setters_clear_cached_id() {
        let mut tx = sample_tx();
        let unsigned = tx.id().unwrap().to_string();

        tx.set_signature(Some(Signature::from_bytes(vec![0x30, 0x01, 0x01])));
        let with_primary = tx.id().unwrap().to_string();
        assert_ne!(with_primary, unsigned);
        assert_eq!(with_primary, tx.compute_id().unwrap());

        tx.set_second_signature(Some(Signature::from_bytes(vec![0x30, 0x01, 0x02])));
        assert_ne!(tx.id().unwrap(), with_primary);
        assert_eq!(tx.id().unwrap(), tx.compute_id().unwrap());

        tx.set_signature(None);
        tx.set_second_signature(None);
        assert_eq!(tx.id().unwrap(), unsigned);
    }

    #[test]
    fn accessors_expose_header_fields() {
        let tx = sample_tx();
        assert_eq!(tx.version(), 2);
        assert_eq!(tx.type_group(), 1);
        assert_eq!(tx.nonce(), 1);
        assert_eq!(tx.fee(), 100);
        assert_eq!(tx.network(), Network::Devnet.address_version());
        assert_eq!(tx.asset().transaction_type(), TransactionType::Transfer);
        assert!(tx.signature().is_none() && tx.signatures().is_empty());
    }

    #[test]
    fn different_nonce_different_id() {
        let tx1 = sample_tx();
        let mut tx2 = sample_tx();
        tx2.nonce = 2;
        assert_ne!(tx1.id().unwrap(), tx2.id().unwrap());
    }

    #[test]
    fn equality_ignores_id_cache() {
        let tx1 = sample_tx();
        let tx2 = sample_tx();
        tx1.id().unwrap();
        assert_eq!(tx1, tx2);
    }

    #[test]
    fn empty_vendor_field_is_none() {
        let tx = TransactionBuilder::new(Asset::Vote(vec![]))
            .vendor_field("")
            .build();
        assert_eq!(tx.vendor_field, None);

        let mut raw = tx.clone();
        raw.vendor_field = Some(String::new());
        assert_eq!(raw, tx);
    }

    #[test]
    fn typed_accessors() {
        let tx = sample_tx();
        assert_eq!(tx.transfer().unwrap().amount, 1_000_000);
        assert_eq!(
            tx.vote().unwrap_err(),
            TransactionError::AssetMismatch {
                expected: TransactionType::Vote,
                found: TransactionType::Transfer,
            }
        );
        assert!(tx.ipfs().is_err());
        assert!(tx.multi_payment().is_err());
    }

    #[test]
    fn signable_bytes_exclude_signatures() {
        let mut tx = sample_tx();
        let before = tx.to_signable_bytes().unwrap();
        tx.signature = Some(Signature::from_bytes(vec![0x30, 0x01, 0x00]));
        assert_eq!(before, tx.to_signable_bytes().unwrap());
        assert_ne!(before, tx.to_bytes().unwrap());
    }

    #[test]
    fn second_signable_bytes_require_primary() {
        let tx = sample_tx();
        assert!(matches!(
            tx.to_second_signable_bytes(),
            Err(TransactionError::MissingSignature { .. })
        ));
    }

    #[test]
    fn json_roundtrip_includes_id_and_type() {
        let tx = build_transfer(sample_tx(), PASSPHRASE, None).unwrap();
        let json = tx.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], 0);
        assert_eq!(value["id"], tx.id().unwrap());
        assert_eq!(value["asset"]["transfer"]["recipientId"], RECIPIENT);

        let back = Transaction::from_json(&json).unwrap();
        assert_eq!(back, tx);
        assert_eq!(back.id().unwrap(), tx.id().unwrap());
    }

    #[test]
    fn json_with_wrong_id_rejected() {
        let tx = sample_tx();
        let mut value: serde_json::Value = serde_json::from_str(&tx.to_json().unwrap()).unwrap();
        value["id"] = serde_json::Value::String("00".repeat(32));
        let err = Transaction::from_json(&value.to_string()).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Identity));
    }

    #[test]
    fn json_with_wrong_type_rejected() {
        let tx = sample_tx();
        let mut value: serde_json::Value = serde_json::from_str(&tx.to_json().unwrap()).unwrap();
        value["type"] = 3.into();
        assert!(matches!(
            Transaction::from_json(&value.to_string()),
            Err(TransactionError::AssetMismatch { .. })
        ));
    }

    #[test]
    fn build_rejects_wrong_draft() {
        let err = build_vote(sample_tx(), PASSPHRASE, None).unwrap_err();
        assert_eq!(
            err,
            TransactionError::AssetMismatch {
                expected: TransactionType::Vote,
                found: TransactionType::Transfer,
            }
        );
    }

    #[test]
    fn build_second_signature_registration_uses_second_key() {
        let second = "This is a top secret second passphrase";
        let draft = TransactionBuilder::new(Asset::Vote(vec![])).nonce(5).build();
        let tx = build_second_signature_registration(draft, PASSPHRASE, second).unwrap();
        assert_eq!(
            tx.second_signature_registration().unwrap().public_key,
            PublicKey::from_passphrase(second).unwrap()
        );
        assert!(tx.signature.is_some());
        assert!(tx.second_signature.is_none());
    }

    #[test]
    fn build_vote_sets_sender() {
        let delegate = PublicKey::from_hex(
            "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192",
        )
        .unwrap();
        let draft = TransactionBuilder::new(Asset::Vote(vec![Vote::vote(delegate)])).build();
        let tx = build_vote(draft, PASSPHRASE, None).unwrap();
        assert_eq!(
            tx.sender_public_key,
            PublicKey::from_passphrase(PASSPHRASE).unwrap()
        );
        assert_eq!(tx.vote().unwrap()[0].sign, VoteSign::Vote);
    }
}
