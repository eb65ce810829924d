//! This module holds typed parameters for various endpoint inputs.
//!
//! Each parameter type is a plain serde struct that the controllers convert
//! into the matching `domain` request before any invitation logic runs.

pub(crate) mod invitation;
pub(crate) mod invite;
pub(crate) mod qr;
