//! ACL specification store
//!
//! Holds, per configured queue and operation, the raw ACL expression and its
//! parsed [`AccessControlList`]. A store is built once and never mutated;
//! share it behind an `Arc` and replace it wholesale to reconfigure.

use crate::acl::list::AccessControlList;
use crate::acl::types::OperationKind;
use crate::config::AppConfig;
use crate::error::ConfigError;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Name of the queue used when no queue names are configured
pub const DEFAULT_QUEUE_NAME: &str = "default";

/// Characters that may not appear in a queue name
const RESERVED_QUEUE_CHARS: &[char] = &['.', ',', '*', '/'];

/// ACL configuration of one queue
#[derive(Debug, Clone, Default)]
pub struct QueueAcls {
    expressions: BTreeMap<OperationKind, String>,
    acls: BTreeMap<OperationKind, AccessControlList>,
}

impl QueueAcls {
    /// Raw expression for an operation, if configured
    pub fn expression(&self, operation: OperationKind) -> Option<&str> {
        self.expressions.get(&operation).map(String::as_str)
    }

    /// Parsed ACL for an operation, if configured
    pub fn acl(&self, operation: OperationKind) -> Option<&AccessControlList> {
        self.acls.get(&operation)
    }

    fn set(&mut self, operation: OperationKind, expression: String) {
        self.acls
            .insert(operation, AccessControlList::parse(&expression));
        self.expressions.insert(operation, expression);
    }
}

/// Immutable mapping of queue name to per-operation ACLs
#[derive(Debug, Clone, Default)]
pub struct QueueAclStore {
    /// Queues in configuration order
    queues: Vec<QueueAcls>,
    /// Queue name to position in `queues`
    index: HashMap<String, usize>,
    /// Queue names in configuration order
    names: Vec<String>,
}

impl QueueAclStore {
    pub fn builder() -> QueueAclStoreBuilder {
        QueueAclStoreBuilder::default()
    }

    /// Build a store from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().strict_keys(config.acls.strict_keys);

        for name in config.queue.queue_names() {
            builder = builder.queue(name);
        }

        for (queue, keys) in &config.queue.definitions {
            for (key, expression) in keys {
                builder = builder.raw_acl(queue, key, expression);
            }
        }

        builder.build()
    }

    /// Build a store from flat properties such as `queue.qu1.acl-submit-job`
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let config = crate::config::load_config_from_properties(properties)?;
        Self::from_config(&config)
    }

    /// All configured queue names, in configuration order
    pub fn queue_names(&self) -> &[String] {
        &self.names
    }

    pub fn queue(&self, name: &str) -> Option<&QueueAcls> {
        self.index.get(name).map(|&i| &self.queues[i])
    }

    pub fn contains_queue(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Raw expression for a queue and operation.
    ///
    /// Returns `None` when the queue is unknown or the operation is not
    /// configured for it.
    pub fn acl_expression(&self, queue: &str, operation: OperationKind) -> Option<&str> {
        self.queue(queue)?.expression(operation)
    }

    /// Parsed ACL for a queue and operation
    pub fn acl(&self, queue: &str, operation: OperationKind) -> Option<&AccessControlList> {
        self.queue(queue)?.acl(operation)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

/// Builder for [`QueueAclStore`]
///
/// Queue names are validated and ACL keys resolved in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct QueueAclStoreBuilder {
    names: Vec<String>,
    entries: Vec<AclEntry>,
    strict_keys: bool,
}

#[derive(Debug)]
struct AclEntry {
    queue: String,
    key: AclKey,
    expression: String,
}

#[derive(Debug)]
enum AclKey {
    Known(OperationKind),
    Raw(String),
}

impl QueueAclStoreBuilder {
    /// Add a queue name
    pub fn queue(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Set the ACL expression of a queue operation
    pub fn acl(
        mut self,
        queue: impl Into<String>,
        operation: OperationKind,
        expression: impl Into<String>,
    ) -> Self {
        self.entries.push(AclEntry {
            queue: queue.into(),
            key: AclKey::Known(operation),
            expression: expression.into(),
        });
        self
    }

    /// Set an ACL expression by configuration key (e.g. `acl-submit-job`).
    ///
    /// Keys naming no known operation leave the queue unconfigured for it,
    /// or fail the build when strict keys are enabled.
    pub fn raw_acl(
        mut self,
        queue: impl Into<String>,
        key: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.entries.push(AclEntry {
            queue: queue.into(),
            key: AclKey::Raw(key.into()),
            expression: expression.into(),
        });
        self
    }

    /// Reject ACL keys that name no known operation
    pub fn strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    pub fn build(self) -> Result<QueueAclStore, ConfigError> {
        let mut store = QueueAclStore::default();

        for name in self.names {
            validate_queue_name(&name)?;
            if store.index.contains_key(&name) {
                warn!(queue = %name, "Duplicate queue name ignored");
                continue;
            }
            store.index.insert(name.clone(), store.queues.len());
            store.names.push(name);
            store.queues.push(QueueAcls::default());
        }

        for entry in self.entries {
            let Some(&position) = store.index.get(&entry.queue) else {
                warn!(
                    queue = %entry.queue,
                    "ACL defined for a queue that is not in queue.names, ignoring"
                );
                continue;
            };

            let operation = match entry.key {
                AclKey::Known(operation) => operation,
                AclKey::Raw(key) => match OperationKind::try_parse(&key) {
                    Some(operation) => operation,
                    None if self.strict_keys => {
                        return Err(ConfigError::unknown_operation(entry.queue, key));
                    }
                    None => {
                        warn!(
                            queue = %entry.queue,
                            key = %key,
                            "Unrecognized ACL key, operation stays unconfigured"
                        );
                        continue;
                    }
                },
            };

            debug!(
                queue = %entry.queue,
                operation = %operation,
                expression = %entry.expression,
                "Configured queue ACL"
            );
            store.queues[position].set(operation, entry.expression);
        }

        info!(queues = store.len(), "Built queue ACL store");
        Ok(store)
    }
}

/// Check a queue name for emptiness and reserved characters
pub fn validate_queue_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::invalid_queue_name(name, "name is empty"));
    }

    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || RESERVED_QUEUE_CHARS.contains(c))
    {
        return Err(ConfigError::invalid_queue_name(
            name,
            format!("contains reserved character {:?}", c),
        ));
    }

    Ok(())
}
