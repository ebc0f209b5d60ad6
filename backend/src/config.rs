//! Application configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! first) and can be overridden by CLI flags. The resulting [`AppConfig`] is
//! built once at startup and passed down explicitly.

use std::env;
use std::path::PathBuf;

use crate::error::RenderResult;
use crate::render::{TemplateEngine, TemplateSet};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum upload size for the HTTP API (in bytes).
///
/// 10 MB limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable names.
pub const ENV_PORT: &str = "PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "REJOINDER_MAX_UPLOAD_BYTES";
pub const ENV_TEMPLATE_DIR: &str = "REJOINDER_TEMPLATE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Directory with template overrides; embedded templates when `None`.
    pub template_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            template_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Unparsable numbers fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup(ENV_PORT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            max_upload_bytes: lookup(ENV_MAX_UPLOAD_BYTES)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            template_dir: lookup(ENV_TEMPLATE_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn with_template_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.template_dir = dir;
        }
        self
    }

    /// Load the configured templates and compile them.
    pub fn template_engine(&self) -> RenderResult<TemplateEngine> {
        let templates = match &self.template_dir {
            Some(dir) => TemplateSet::from_dir(dir)?,
            None => TemplateSet::embedded(),
        };
        TemplateEngine::new(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_values_from_env() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "3000"),
            (ENV_MAX_UPLOAD_BYTES, "1024"),
            (ENV_TEMPLATE_DIR, "/srv/templates"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.template_dir, Some(PathBuf::from("/srv/templates")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "eighty"),
            (ENV_MAX_UPLOAD_BYTES, "-1"),
            (ENV_TEMPLATE_DIR, "  "),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let config = AppConfig::default()
            .with_port(Some(9000))
            .with_template_dir(Some(PathBuf::from("tpl")));
        assert_eq!(config.port, 9000);
        assert_eq!(config.template_dir, Some(PathBuf::from("tpl")));

        let unchanged = config.clone().with_port(None).with_template_dir(None);
        assert_eq!(unchanged, config);
    }

    #[test]
    fn test_template_engine_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default().with_template_dir(Some(dir.path().to_path_buf()));
        assert!(config.template_engine().is_ok());
        assert!(AppConfig::default().template_engine().is_ok());
    }
}
