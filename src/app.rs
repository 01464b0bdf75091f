use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::api::client::ApiClient;
use crate::cli::Args;
use crate::ui::chat_view::ChatView;

/// Emulator loopback alias, LAN address, local loopback; all serving the same chat route.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "http://10.0.2.2:5000/chat/user/1",
    "http://192.168.1.100:5000/chat/user/1",
    "http://127.0.0.1:5000/chat/user/1",
];

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("timeout must be at least one second")]
    ZeroTimeout,
    #[error("no config directory available")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub endpoints: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppState {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("banking-chat.toml"))
    }

    fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::toml_path().ok_or(ConfigError::NoConfigDir),
        }
    }

    /// A missing file means defaults. A file that exists but does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(toml::from_str(&text)?)
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(explicit) {
            Ok(path) => Self::load_from(&path),
            Err(ConfigError::NoConfigDir) => {
                log::warn!("no config directory available, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn save(&self, explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = Self::resolve_path(explicit)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Command-line endpoints replace the configured list wholesale.
    pub fn with_overrides(mut self, endpoints: &[String], timeout_secs: Option<u64>) -> Self {
        if !endpoints.is_empty() {
            self.endpoints = endpoints.to_vec();
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    /// Normalised endpoints in their original order.
    pub fn validated_endpoints(&self) -> Result<Vec<String>, ConfigError> {
        self.endpoints
            .iter()
            .map(|raw| {
                let endpoint = crate::utils::normalize_url(raw);
                match Url::parse(&endpoint) {
                    Ok(_) => Ok(endpoint),
                    Err(source) => Err(ConfigError::InvalidEndpoint { endpoint, source }),
                }
            })
            .collect()
    }

    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.timeout_secs))
    }
}

pub fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::load(args.config.as_deref())?
        .with_overrides(&args.endpoints, args.timeout);

    if args.write_config {
        let path = state.save(args.config.as_deref())?;
        println!("Config written to {}", path.display());
    }

    let client = ApiClient::new(state.validated_endpoints()?, state.timeout()?)?;
    log::info!("endpoints: {}", client.endpoints().join(", "));
    let view = ChatView::new(client);

    if let Some(prompt) = &args.prompt {
        if let Some(reply) = view.submit(prompt) {
            println!("{}", reply.text);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    view.run(stdin.lock(), io::stdout())?;
    Ok(())
}
