//! Compact, URL-safe payload encoding.
//!
//! A payload is serialized to UTF-8 JSON and the JSON bytes are encoded with
//! base64url without padding. The result only contains `A-Z a-z 0-9 - _` and
//! can be placed in a query string as-is.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};

use crate::error::{token_error, Error, ErrorKind};

/// An open-ended invitation payload.
///
/// Keys serialize in insertion order, so two payloads built in the same order
/// produce identical bytes.
pub type Payload = Map<String, Value>;

/// Encode a payload into its URL-safe body string.
pub fn encode(payload: &Payload) -> Result<String, Error> {
    let data = serialize(payload)?;
    Ok(encode_bytes(&data))
}

/// Decode a body string produced by [`encode`] back into a payload.
pub fn decode(body: &str) -> Result<Payload, Error> {
    let data = decode_bytes(body)?;
    into_payload(parse(&data)?)
}

/// Serialize a payload to its JSON bytes.
pub fn serialize(payload: &Payload) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(payload).map_err(|e| Error::with_source(ErrorKind::Serialization, e))
}

/// Base64url-encode raw bytes without padding.
pub fn encode_bytes(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode a base64url body into the raw JSON bytes it carries.
///
/// The bytes must be valid UTF-8; anything else is a malformed token.
pub fn decode_bytes(body: &str) -> Result<Vec<u8>, Error> {
    let data = URL_SAFE_NO_PAD
        .decode(body)
        .map_err(|e| Error::with_source(ErrorKind::MalformedToken, e))?;

    std::str::from_utf8(&data).map_err(|e| Error::with_source(ErrorKind::MalformedToken, e))?;

    Ok(data)
}

/// Parse JSON bytes into a value.
pub fn parse(data: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(data).map_err(|e| Error::with_source(ErrorKind::MalformedToken, e))
}

/// Narrow a parsed value to a payload mapping.
pub fn into_payload(value: Value) -> Result<Payload, Error> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(token_error(
            ErrorKind::InvalidPayload,
            "Payload is not a JSON object",
        )),
    }
}
