//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (QUEUE_ACL__*)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! Flat `key = value` properties (`acls.enabled`, `queue.names`,
//! `queue.<name>.acl-<operation>`) are supported through
//! [`load_config_from_properties`].

use crate::acl::store::validate_queue_name;
use crate::config::types::{AppConfig, LogFormat};
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, warn};

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "queue-acl.toml",
    ".queue-acl.toml",
    "~/.config/queue-acl/config.toml",
    "/etc/queue-acl/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                debug!(path = %expanded, "Using configuration file");
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with QUEUE_ACL_ prefix
    // e.g., QUEUE_ACL__ACLS__ENABLED, QUEUE_ACL__QUEUE__NAMES
    // Double underscore (__) maps to nested keys (acls.enabled)
    builder = builder.add_source(
        Environment::with_prefix("QUEUE_ACL")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from flat `key = value` properties.
///
/// Keys under `queue.` that do not have the `queue.<name>.<key>` shape are
/// ignored with a warning, as are keys outside the known sections.
pub fn load_config_from_properties<I, K, V>(properties: I) -> Result<AppConfig, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = AppConfig::default();

    for (key, value) in properties {
        let (key, value) = (key.as_ref(), value.as_ref());

        match key {
            "acls.enabled" => config.acls.enabled = parse_bool(key, value)?,
            "acls.strict_keys" => config.acls.strict_keys = parse_bool(key, value)?,
            "queue.names" => config.queue.names = value.to_string(),
            "logging.level" => config.logging.level = value.trim().to_string(),
            "logging.format" => config.logging.format = parse_log_format(value)?,
            _ => {
                if let Some(rest) = key.strip_prefix("queue.") {
                    match rest.split_once('.') {
                        Some((queue, acl_key)) => {
                            config
                                .queue
                                .definitions
                                .entry(queue.to_string())
                                .or_default()
                                .insert(acl_key.to_string(), value.to_string());
                        }
                        None => warn!(key, "Ignoring malformed queue property"),
                    }
                } else {
                    debug!(key, "Ignoring unrelated property");
                }
            }
        }
    }

    validate_config(&config)?;

    Ok(config)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::Invalid {
            message: format!("{} must be true or false, got: {}", key, value),
        })
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::Invalid {
            message: format!("logging.format must be pretty or json, got: {}", other),
        }),
    }
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let names = config.queue.queue_names();
    if names.is_empty() {
        return Err(ConfigError::Missing {
            field: "queue.names".to_string(),
        });
    }

    for name in names {
        validate_queue_name(name)?;
    }

    Ok(())
}
