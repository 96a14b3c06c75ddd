//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use backdrop::{BackdropError, config::PartialConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for BackdropError {
    fn from(err: ConfigError) -> Self {
        BackdropError::Config(err.to_string())
    }
}

/// Find and load the user configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (backdrop/config.toml)
/// 3. Platform-specific config directory
/// 4. Empty override (built-in defaults) if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
) -> Result<PartialConfig, BackdropError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("backdrop/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "backdrop", "backdrop") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. Nothing to override
    debug!("No configuration file found, using default configuration");
    Ok(PartialConfig::default())
}

/// Load a user configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A theme is registered under a key that is not a fragment
fn load_config_file(path: impl AsRef<Path>) -> Result<PartialConfig, BackdropError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate_config(&config)?;

    Ok(config)
}

/// Parse a user configuration from TOML source.
///
/// # Errors
///
/// Returns [`BackdropError::Parse`] pointing at the offending span.
pub fn parse_config(content: &str) -> Result<PartialConfig, BackdropError> {
    toml::from_str(content).map_err(|err| {
        BackdropError::new_parse_error(
            format!("Failed to parse TOML configuration: {}", err.message()),
            err.span(),
            content,
        )
    })
}

/// Theme keys are matched against the location fragment, which always starts
/// with `#`.
pub(crate) fn validate_config(config: &PartialConfig) -> Result<(), ConfigError> {
    let Some(themes) = config.themes() else {
        return Ok(());
    };
    match themes.keys().find(|hash| !hash.starts_with('#')) {
        Some(hash) => Err(ConfigError::Validation(format!(
            "theme key `{hash}` must start with `#`"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_explicit_config() {
        let file = write_config("density = 12\n[shapes]\nblobs = false\n");
        let config = load_config(Some(file.path())).unwrap();
        let resolved = backdrop::config::resolve(&Default::default(), &config);
        assert_eq!(resolved.density(), 12);
        assert!(!resolved.shapes().blobs());
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, BackdropError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_parse_error_has_span() {
        let file = write_config("density = = 3\n");
        match load_config(Some(file.path())) {
            Err(BackdropError::Parse { span, src, .. }) => {
                assert!(span.is_some());
                assert_eq!(src, "density = = 3\n");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_theme_key_validation() {
        let file = write_config("[theme_by_hash.intro]\ndensity = 3\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("must start with `#`"));

        let file = write_config("[theme_by_hash.\"#intro\"]\ndensity = 3\n");
        assert!(load_config(Some(file.path())).is_ok());
    }
}
