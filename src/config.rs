//! Configuration module for MockDrive.

use serde::Deserialize;
use std::path::Path;

use crate::{MockDriveError, Result};

/// Simulated latency configuration.
///
/// Delays are applied before each simulated operation to mimic network
/// round-trips.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Delay for listing operations in milliseconds.
    #[serde(default = "default_list_delay")]
    pub list_delay_ms: u64,
    /// Delay for create/rename/delete operations in milliseconds.
    #[serde(default = "default_mutate_delay")]
    pub mutate_delay_ms: u64,
    /// Delay for uploads in milliseconds.
    #[serde(default = "default_upload_delay")]
    pub upload_delay_ms: u64,
    /// Delay for shell commands in milliseconds.
    #[serde(default = "default_shell_delay")]
    pub shell_delay_ms: u64,
    /// Extra random delay added on top of each base delay (0 disables).
    #[serde(default)]
    pub jitter_ms: u64,
}

fn default_list_delay() -> u64 {
    300
}

fn default_mutate_delay() -> u64 {
    300
}

fn default_upload_delay() -> u64 {
    1200
}

fn default_shell_delay() -> u64 {
    500
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            list_delay_ms: default_list_delay(),
            mutate_delay_ms: default_mutate_delay(),
            upload_delay_ms: default_upload_delay(),
            shell_delay_ms: default_shell_delay(),
            jitter_ms: 0,
        }
    }
}

impl SimulationConfig {
    /// All delays disabled. Used by tests.
    pub fn instant() -> Self {
        Self {
            list_delay_ms: 0,
            mutate_delay_ms: 0,
            upload_delay_ms: 0,
            shell_delay_ms: 0,
            jitter_ms: 0,
        }
    }
}

/// Mock authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign the simulated JWTs.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: u64,
}

fn default_jwt_secret() -> String {
    // Development-only default; override via config or MOCKDRIVE_JWT_SECRET.
    "mockdrive-dev-secret".to_string()
}

fn default_access_ttl() -> u64 {
    300
}

fn default_refresh_ttl() -> u64 {
    24 * 60 * 60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
        }
    }
}

/// Site configuration for the simulated product.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Path of the subtree whose nodes are publicly visible.
    #[serde(default = "default_public_root")]
    pub public_root: String,
    /// Base URL used when building public page links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Username owning seeded nodes and shell-created entries.
    #[serde(default = "default_owner")]
    pub default_owner: String,
}

fn default_public_root() -> String {
    "/public".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_owner() -> String {
    "testuser".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_root: default_public_root(),
            public_base_url: default_public_base_url(),
            default_owner: default_owner(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/mockdrive.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Simulated latency settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Mock authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Site settings.
    #[serde(default)]
    pub site: SiteConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MockDriveError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable
    /// overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(|e| MockDriveError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MOCKDRIVE_JWT_SECRET`: override the JWT signing secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("MOCKDRIVE_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(MockDriveError::Config(
                "jwt_secret is not set. Set it in mockdrive.toml or via \
                 MOCKDRIVE_JWT_SECRET."
                    .to_string(),
            ));
        }
        if !self.site.public_root.starts_with('/') {
            return Err(MockDriveError::Config(format!(
                "public_root must be an absolute path, got \"{}\"",
                self.site.public_root
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.simulation.list_delay_ms, 300);
        assert_eq!(config.simulation.upload_delay_ms, 1200);
        assert_eq!(config.simulation.jitter_ms, 0);
        assert_eq!(config.auth.access_ttl_secs, 300);
        assert_eq!(config.site.public_root, "/public");
        assert_eq!(config.site.default_owner, "testuser");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r#"
            [simulation]
            list_delay_ms = 5
            jitter_ms = 2

            [site]
            public_root = "/www"
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.list_delay_ms, 5);
        assert_eq!(config.simulation.jitter_ms, 2);
        // Unset fields keep their defaults.
        assert_eq!(config.simulation.upload_delay_ms, 1200);
        assert_eq!(config.site.public_root, "/www");
        assert_eq!(config.site.default_owner, "testuser");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = Config::parse("not [valid").unwrap_err();
        assert!(matches!(err, MockDriveError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\naccess_ttl_secs = 60").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.auth.access_ttl_secs, 60);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/does/not/exist.toml").unwrap_err();
        assert!(matches!(err, MockDriveError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = String::new();
        assert!(matches!(
            config.validate(),
            Err(MockDriveError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_relative_public_root() {
        let mut config = Config::default();
        config.site.public_root = "public".to_string();
        assert!(matches!(
            config.validate(),
            Err(MockDriveError::Config(_))
        ));
    }

    #[test]
    fn test_instant_simulation() {
        let sim = SimulationConfig::instant();
        assert_eq!(sim.list_delay_ms, 0);
        assert_eq!(sim.mutate_delay_ms, 0);
        assert_eq!(sim.upload_delay_ms, 0);
        assert_eq!(sim.shell_delay_ms, 0);
    }
}
