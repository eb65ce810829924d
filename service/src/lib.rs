use config::Config;
use invite_token::error::token_error;
use invite_token::{Error as TokenError, ErrorKind as TokenErrorKind, Signer};
use log::{info, warn};
use std::sync::Arc;

pub mod config;
pub mod logging;

/// Builds the process-wide token signer from configuration.
///
/// The secret is captured once here; every request shares this signer.
/// Production refuses to start with the development fallback secret.
pub fn init_signer(config: &Config) -> Result<Signer, TokenError> {
    if config.is_production() && config.uses_default_hmac_secret() {
        return Err(token_error(
            TokenErrorKind::InvalidKey,
            "HMAC_SECRET must be set when running in production",
        ));
    }

    if config.uses_default_hmac_secret() {
        warn!("HMAC_SECRET is not set, signing invitations with the development fallback secret");
    }

    let signer = Signer::new(config.hmac_secret())?;
    info!(
        "Invitation signer ready, links will use base URL {}",
        config.public_base_url()
    );

    Ok(signer)
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<Signer>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, signer: &Arc<Signer>) -> Self {
        Self {
            signer: Arc::clone(signer),
            config: app_config,
        }
    }

    pub fn signer_ref(&self) -> &Signer {
        self.signer.as_ref()
    }
}
