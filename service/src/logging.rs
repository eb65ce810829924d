use crate::config::{Config, RustEnv};
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP stack modules that are silenced unless the level is Trace.
const FILTERED_MODULES: &[&str] = &["tower", "tower_http", "tracing", "hyper", "axum"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger.
    ///
    /// Dependency logs from the HTTP stack only show at Trace. Colors are
    /// disabled outside of development so collected logs stay plain text.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(Self::should_filter_dependencies(config.log_level_filter)),
            TerminalMode::Mixed,
            Self::color_choice(&config.runtime_env()),
        )
    }

    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    fn color_choice(env: &RustEnv) -> ColorChoice {
        match env {
            RustEnv::Development => ColorChoice::Auto,
            RustEnv::Staging | RustEnv::Production => ColorChoice::Never,
        }
    }

    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
