//! # invite-token
//!
//! Signed, time-limited invitation tokens:
//! - Codec: payload ⇄ compact base64url JSON body
//! - Signer: HMAC-SHA256 authentication of the serialized payload
//! - Expiry: `exp` checks in milliseconds since the Unix epoch
//!
//! ## Token format
//!
//! `base64url(json) + "." + base64url(hmac_sha256(secret, json))`, both parts
//! without padding. The token is the only state; nothing is stored server-side.
//!
//! ## Usage
//!
//! ```rust
//! use invite_token::{is_expired, Payload, Signer};
//! use secrecy::SecretString;
//! use serde_json::json;
//!
//! let signer = Signer::new(SecretString::from("dev_secret".to_string())).unwrap();
//!
//! let mut payload = Payload::new();
//! payload.insert("contactId".to_string(), json!("c1"));
//! payload.insert("eventId".to_string(), json!("evt1"));
//! payload.insert("exp".to_string(), json!(2000));
//!
//! let token = signer.sign(&payload).unwrap();
//! let verified = signer.verify(&token).unwrap();
//!
//! assert_eq!(verified, payload);
//! assert!(is_expired(2000));
//! ```

pub mod codec;
pub mod error;
pub mod expiry;
pub mod signer;

// Re-export commonly used types
pub use codec::Payload;
pub use error::{Error, ErrorKind};
pub use expiry::{is_expired, is_expired_at, now_ms};
pub use signer::Signer;
