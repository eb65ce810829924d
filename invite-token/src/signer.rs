//! HMAC-SHA256 signing and verification of invitation tokens.
//!
//! A token is `base64url(json) + "." + base64url(hmac_sha256(secret, json))`.
//! No version byte or algorithm identifier is carried in the token.

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::Sha256;

use crate::codec::{self, Payload};
use crate::error::{token_error, Error, ErrorKind};

type HmacSha256 = Hmac<Sha256>;

/// Separator between the encoded body and the signature.
pub const SEPARATOR: char = '.';

/// Signs payloads into tokens and verifies tokens back into payloads.
///
/// The secret is injected at construction and never read from the environment,
/// so every token this signer accepts was produced under the same secret.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Create a new signer keyed by `secret`.
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC signing secret, must not be empty
    pub fn new(secret: SecretString) -> Result<Self, Error> {
        let key = secret.expose_secret();
        if key.is_empty() {
            return Err(token_error(
                ErrorKind::InvalidKey,
                "Signing secret must not be empty",
            ));
        }

        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|_| token_error(ErrorKind::InvalidKey, "Invalid HMAC key"))?;

        Ok(Self { mac })
    }

    /// Sign a payload into a token.
    ///
    /// The same payload (same keys in the same order) and secret always
    /// produce the same token.
    pub fn sign(&self, payload: &Payload) -> Result<String, Error> {
        let data = codec::serialize(payload)?;
        let signature = self.tag(&data);

        Ok(format!(
            "{}{}{}",
            codec::encode_bytes(&data),
            SEPARATOR,
            codec::encode_bytes(&signature)
        ))
    }

    /// Sign a typed claims struct. Keys follow the struct's field order.
    pub fn sign_claims<T: Serialize>(&self, claims: &T) -> Result<String, Error> {
        let value = serde_json::to_value(claims)
            .map_err(|e| Error::with_source(ErrorKind::Serialization, e))?;

        match value {
            Value::Object(payload) => self.sign(&payload),
            _ => Err(token_error(
                ErrorKind::Serialization,
                "Claims must serialize to a JSON object",
            )),
        }
    }

    /// Verify a token and return its payload.
    ///
    /// Only authenticity is checked here. Callers must still check `exp` with
    /// [`crate::is_expired`] and validate any fields they rely on.
    pub fn verify(&self, token: &str) -> Result<Payload, Error> {
        let (body, signature) = split(token)?;

        let data = codec::decode_bytes(body)?;
        let value = codec::parse(&data)?;

        let supplied = URL_SAFE_NO_PAD.decode(signature).map_err(|_| {
            token_error(ErrorKind::InvalidSignature, "Invalid signature encoding")
        })?;

        let mut mac = self.mac.clone();
        mac.update(&data);
        mac.verify_slice(&supplied).map_err(|_| {
            debug!("Token signature mismatch");
            token_error(ErrorKind::InvalidSignature, "Invalid signature")
        })?;

        codec::into_payload(value)
    }

    /// Verify a token and deserialize its payload into `T`.
    pub fn verify_claims<T: DeserializeOwned>(&self, token: &str) -> Result<T, Error> {
        let payload = self.verify(token)?;
        serde_json::from_value(Value::Object(payload))
            .map_err(|e| Error::with_source(ErrorKind::InvalidPayload, e))
    }

    fn tag(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

/// Split a token into exactly two non-empty parts.
fn split(token: &str) -> Result<(&str, &str), Error> {
    let mut parts = token.split(SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(body), Some(signature), None) if !body.is_empty() && !signature.is_empty() => {
            Ok((body, signature))
        }
        _ => Err(token_error(ErrorKind::MalformedToken, "Malformed token")),
    }
}
