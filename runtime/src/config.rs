//! Configuration read from the environment.

use env_logger::Builder;

const ENV_LOG: &str = "STDVEC_LOG";
const ENV_LOG_STYLE: &str = "STDVEC_LOG_STYLE";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings of a loaded bridge library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Filter directives in the syntax of [env_logger], e.g. `stdvec_runtime=debug`.
    pub log_filter: String,

    /// `auto`, `always` or `never`.
    pub log_style: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var(ENV_LOG).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
            log_style: std::env::var(ENV_LOG_STYLE).ok(),
        }
    }

    /// Builds a logger honoring this config.
    pub fn logger(&self) -> Builder {
        let mut builder = Builder::new();
        builder.parse_filters(&self.log_filter);
        if let Some(style) = &self.log_style {
            builder.parse_write_style(style);
        }
        builder
    }

    /// Installs the logger unless the process already has one.
    pub fn init_logger(&self) {
        if self.logger().try_init().is_ok() {
            log::debug!("Logging initialized with filter `{}`", &self.log_filter);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.into(),
            log_style: None,
        }
    }
}
