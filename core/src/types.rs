//! Shared types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Build/run mode of the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    #[default]
    Development,
    Production,
}

impl EnvironmentMode {
    /// Parse a mode flag.
    ///
    /// Unknown values fail closed to [`EnvironmentMode::Development`] so a
    /// typo can never produce a production base path.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => EnvironmentMode::Production,
            "development" | "dev" => EnvironmentMode::Development,
            other => {
                tracing::warn!(mode = %other, "Unrecognized environment mode, using development");
                EnvironmentMode::Development
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentMode::Development => "development",
            EnvironmentMode::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build tool command the application was started from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildCommand {
    #[default]
    Serve,
    Build,
}

impl BuildCommand {
    /// Parse a command flag. Unknown values fail closed to [`BuildCommand::Serve`].
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_lowercase().as_str() {
            "build" => BuildCommand::Build,
            "serve" | "dev" => BuildCommand::Serve,
            other => {
                tracing::warn!(command = %other, "Unrecognized build command, using serve");
                BuildCommand::Serve
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildCommand::Serve => "serve",
            BuildCommand::Build => "build",
        }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment resolved once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub mode: EnvironmentMode,
    pub command: BuildCommand,
}

impl Environment {
    pub fn new(mode: EnvironmentMode, command: BuildCommand) -> Self {
        Self { mode, command }
    }

    /// Resolve from raw flags, failing closed on anything unrecognized
    pub fn from_flags(mode: Option<&str>, command: Option<&str>) -> Self {
        Self {
            mode: mode.map(EnvironmentMode::from_flag).unwrap_or_default(),
            command: command.map(BuildCommand::from_flag).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert_eq!(EnvironmentMode::from_flag("production"), EnvironmentMode::Production);
        assert_eq!(EnvironmentMode::from_flag(" PROD "), EnvironmentMode::Production);
        assert_eq!(EnvironmentMode::from_flag("development"), EnvironmentMode::Development);
        assert_eq!(EnvironmentMode::from_flag("staging"), EnvironmentMode::Development);
        assert_eq!(EnvironmentMode::from_flag(""), EnvironmentMode::Development);
    }

    #[test]
    fn test_command_flags() {
        assert_eq!(BuildCommand::from_flag("build"), BuildCommand::Build);
        assert_eq!(BuildCommand::from_flag("serve"), BuildCommand::Serve);
        assert_eq!(BuildCommand::from_flag("preview"), BuildCommand::Serve);
    }

    #[test]
    fn test_environment_defaults() {
        let env = Environment::from_flags(None, None);
        assert_eq!(env.mode, EnvironmentMode::Development);
        assert_eq!(env.command, BuildCommand::Serve);

        let env = Environment::from_flags(Some("production"), Some("bogus"));
        assert_eq!(env.mode, EnvironmentMode::Production);
        assert_eq!(env.command, BuildCommand::Serve);
    }
}
