//! Configuration management

use epub_creator_core::{
    base_path::Trigger, BasePath, BasePathPolicy, Environment, Error, Result, DEFAULT_DEPLOY_PATH,
};
use serde::{Deserialize, Serialize};

/// Application configuration
///
/// Mode, command and trigger are kept as raw strings so that unknown values
/// fail closed to development instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address to bind to
    pub addr: String,

    /// Environment mode (`development` or `production`)
    pub mode: String,

    /// Build command (`serve` or `build`)
    pub command: String,

    /// Base path resolution
    pub base_path: BasePathConfig,

    /// Directory served under `{base}static`
    pub static_dir: String,

    /// Endpoint the converter form posts to
    pub converter_endpoint: Option<String>,
}

/// Base path trigger and deployment path, configured independently
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePathConfig {
    /// `mode` or `command`
    pub trigger: String,

    /// Sub-path used when the trigger fires
    pub deploy_path: String,
}

impl Default for BasePathConfig {
    fn default() -> Self {
        Self {
            trigger: "mode".to_string(),
            deploy_path: DEFAULT_DEPLOY_PATH.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            mode: "development".to_string(),
            command: "serve".to_string(),
            base_path: BasePathConfig::default(),
            static_dir: "server/static".to_string(),
            converter_endpoint: None,
        }
    }
}

/// Values given on the command line, applied over the loaded configuration
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub addr: Option<String>,
    pub mode: Option<String>,
    pub command: Option<String>,
    pub trigger: Option<String>,
    pub deploy_path: Option<String>,
}

impl Config {
    /// Load configuration from file or environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            Self::load_from_file(p)
        } else {
            Ok(Self::load_from_env())
        }
    }

    /// Load from configuration file
    fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    fn load_from_env() -> Self {
        let defaults = Config::default();
        let var = |name: &str, default: String| std::env::var(name).unwrap_or(default);

        Config {
            addr: var("EPUB_CREATOR_ADDR", defaults.addr),
            mode: var("EPUB_CREATOR_MODE", defaults.mode),
            command: var("EPUB_CREATOR_COMMAND", defaults.command),
            base_path: BasePathConfig {
                trigger: var("EPUB_CREATOR_TRIGGER", defaults.base_path.trigger),
                deploy_path: var("EPUB_CREATOR_BASE_PATH", defaults.base_path.deploy_path),
            },
            static_dir: var("STATIC_DIR", defaults.static_dir),
            converter_endpoint: std::env::var("CONVERTER_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(addr) = overrides.addr {
            self.addr = addr;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(command) = overrides.command {
            self.command = command;
        }
        if let Some(trigger) = overrides.trigger {
            self.base_path.trigger = trigger;
        }
        if let Some(deploy_path) = overrides.deploy_path {
            self.base_path.deploy_path = deploy_path;
        }
        self
    }

    pub fn environment(&self) -> Environment {
        Environment::from_flags(Some(&self.mode), Some(&self.command))
    }

    pub fn base_path_policy(&self) -> Result<BasePathPolicy> {
        BasePathPolicy::new(
            Trigger::from_flag(&self.base_path.trigger),
            &self.base_path.deploy_path,
        )
    }

    /// Resolve the base path once for this process
    pub fn resolve_base_path(&self) -> Result<BasePath> {
        Ok(self.base_path_policy()?.resolve(&self.environment()))
    }
}
