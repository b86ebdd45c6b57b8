//! Configuration types for queue-acl
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files, environment variables, or flat `key = value` properties.

use crate::acl::DEFAULT_QUEUE_NAME;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Global ACL switches
    pub acls: AclsConfig,

    /// Queue names and per-queue ACL expressions
    pub queue: QueueConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Global ACL settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AclsConfig {
    /// Enforce queue ACLs. When false everyone may do everything.
    pub enabled: bool,

    /// Fail instead of warning on ACL keys that name no known operation
    pub strict_keys: bool,
}

/// Queue configuration
///
/// ```toml
/// [queue]
/// names = "qu1,qu2"
///
/// [queue.qu1]
/// acl-submit-job = "*"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Comma-separated queue names
    pub names: String,

    /// Queue name to ACL key to expression
    #[serde(flatten)]
    pub definitions: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            names: DEFAULT_QUEUE_NAME.to_string(),
            definitions: BTreeMap::new(),
        }
    }
}

impl QueueConfig {
    /// Queue names in configuration order.
    ///
    /// Tokens are trimmed and empty tokens dropped.
    pub fn queue_names(&self) -> Vec<&str> {
        self.names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
