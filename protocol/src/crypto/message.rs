//! Signed free-text messages.
//!
//! A [`SignedMessage`] proves that the holder of a passphrase endorsed a
//! piece of text. The JSON shape (`publicKey`, `signature`, `message`) is
//! what wallets exchange.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keys::{KeyError, PrivateKey, PublicKey};
use super::signatures::{sign, verify, Signature, SignatureError};

#[derive(Debug, Error)]
pub enum MessageError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("invalid message JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub public_key: PublicKey,
    pub signature: Signature,
    pub message: String,
}

impl SignedMessage {
    pub fn sign(message: &str, passphrase: &str) -> Result<Self, MessageError> {
        let key = PrivateKey::from_passphrase(passphrase)?;
        let signature = sign(message.as_bytes(), &key)?;
        Ok(Self {
            public_key: key.public_key(),
            signature,
            message: message.to_string(),
        })
    }

    pub fn verify(&self) -> bool {
        verify(self.message.as_bytes(), &self.signature, &self.public_key)
    }

    pub fn to_json(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_message() {
        let msg = SignedMessage::sign("Hello World", "this is a top secret passphrase").unwrap();
        assert_eq!(
            msg.public_key.to_hex(),
            "034151a3ec46b5670a682b0a63394f863587d1bc97483b1b6c70eb58e7f0aed192"
        );
        assert!(msg.verify());
    }

    #[test]
    fn test_tampered_message_fails() {
        let mut msg = SignedMessage::sign("Hello World", "secret").unwrap();
        msg.message.push('!');
        assert!(!msg.verify());
    }

    #[test]
    fn test_json_roundtrip() {
        let msg = SignedMessage::sign("Hello World", "secret").unwrap();
        let json = msg.to_json().unwrap();
        assert!(json.contains("\"publicKey\""));
        let back = SignedMessage::from_json(&json).unwrap();
        assert_eq!(back, msg);
        assert!(back.verify());
    }
}
