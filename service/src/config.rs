use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;

/// Fallback HMAC secret used when `HMAC_SECRET` is not set. Only acceptable
/// outside of production.
pub const DEFAULT_HMAC_SECRET: &str = "dev_secret";

/// Default public base URL used to build invitation and QR links.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Default invitation lifetime: 7 days.
pub const DEFAULT_TTL_MINUTES: u64 = 60 * 24 * 7;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The secret used to sign and verify invitation tokens. Changing it
    /// invalidates every outstanding invitation.
    #[arg(long, env, hide_env_values = true, default_value = DEFAULT_HMAC_SECRET)]
    hmac_secret: String,

    /// The public base URL used to build invitation and QR image links
    /// (e.g. https://events.example.com).
    #[arg(long, env, default_value = DEFAULT_PUBLIC_BASE_URL)]
    public_base_url: String,

    /// Invitation lifetime in minutes when a request does not specify one.
    #[arg(long, env, default_value_t = DEFAULT_TTL_MINUTES)]
    pub default_ttl_minutes: u64,

    /// Target width in pixels of rendered QR images.
    #[arg(long, env, default_value_t = 512)]
    pub qr_width: u32,

    /// Quiet zone around rendered QR codes, in modules.
    #[arg(long, env, default_value_t = 1)]
    pub qr_margin: u32,

    /// Directory of static assets (invitation page logo and background) served
    /// for paths no route matches.
    #[arg(long, env, default_value = "public")]
    pub static_dir: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Builds a config from defaults and environment variables only, ignoring
    /// the process command line.
    pub fn from_env() -> Self {
        dotenv().ok();
        Config::parse_from(["invite_platform_rs"])
    }

    pub fn set_hmac_secret(mut self, hmac_secret: String) -> Self {
        self.hmac_secret = hmac_secret;
        self
    }

    pub fn set_public_base_url(mut self, public_base_url: String) -> Self {
        self.public_base_url = public_base_url;
        self
    }

    /// Returns the token signing secret.
    pub fn hmac_secret(&self) -> SecretString {
        SecretString::from(self.hmac_secret.clone())
    }

    /// True when no secret was configured and the development fallback is in use.
    pub fn uses_default_hmac_secret(&self) -> bool {
        self.hmac_secret == DEFAULT_HMAC_SECRET
    }

    /// Returns the public base URL without a trailing slash.
    pub fn public_base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
