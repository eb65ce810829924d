//! Invitation domain layer.
//!
//! Sits between `web` and the `invite-token` core: it turns invitation requests
//! into signed tokens and links, turns presented tokens back into invitations,
//! and renders QR images for either.

pub use invite_token::{now_ms, Payload, Signer};

pub mod error;
pub mod invitation;
pub mod links;
pub mod qr;
