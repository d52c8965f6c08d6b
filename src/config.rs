use std::{env, path::PathBuf};

// Anchored at the crate so a plain start works from any working directory.
const DEFAULT_TEMPLATE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.html");
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public/static");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid APP_PORT {0:?}")]
    Port(String),
    #[error("unknown APP_ENV {0:?}, expected \"development\" or \"production\"")]
    Environment(String),
}

/// Development toggles. Kept as separate flags since verbose error bodies and
/// template reloading are unrelated concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DevMode {
    pub verbose_errors: bool,
    pub auto_reload: bool,
}

impl DevMode {
    pub fn development() -> Self {
        Self {
            verbose_errors: true,
            auto_reload: true,
        }
    }

    pub fn production() -> Self {
        Self {
            verbose_errors: false,
            auto_reload: false,
        }
    }

    /// Tracing filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose_errors {
            "zev_server=debug,tower_http=debug,info"
        } else {
            "info"
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app_host: String,
    pub app_port: u16,
    pub dev_mode: DevMode,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let app_host = lookup("APP_HOST").unwrap_or(defaults.app_host);
        let app_port = match lookup("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Port(raw))?,
            None => defaults.app_port,
        };
        let dev_mode = match lookup("APP_ENV").as_deref() {
            None | Some("development") => DevMode::development(),
            Some("production") => DevMode::production(),
            Some(other) => return Err(ConfigError::Environment(other.to_string())),
        };
        let template_path = lookup("APP_TEMPLATE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.template_path);
        let static_dir = lookup("APP_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Ok(Self {
            app_host,
            app_port,
            dev_mode,
            template_path,
            static_dir,
        })
    }

    pub fn addr(&self) -> String {
        if self.app_host.contains(':') {
            format!("[{}]:{}", self.app_host, self.app_port)
        } else {
            format!("{}:{}", self.app_host, self.app_port)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_host: "127.0.0.1".to_string(),
            app_port: 5000,
            dev_mode: DevMode::development(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}
