//! Queue ACL service handler
//!
//! Answers `GetQueueAcls` requests for resolved identities over a shared
//! store and a runtime ACL switch.

use crate::acl::{AclEvaluator, Identity, OperationKind, QueueAclStore, QueueAclsInfo};
use crate::config::AppConfig;
use crate::error::ConfigError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument};

/// Queue ACL service
///
/// Cheap to clone; clones share the store and the ACL switch.
#[derive(Debug, Clone)]
pub struct QueueAclService {
    /// Queue ACL store
    store: Arc<QueueAclStore>,
    /// Global ACL mode
    acls_enabled: Arc<AtomicBool>,
    evaluator: AclEvaluator,
}

impl QueueAclService {
    /// Create a new service over a store
    pub fn new(store: QueueAclStore, acls_enabled: bool) -> Self {
        Self::new_with_shared(Arc::new(store), acls_enabled)
    }

    /// Create a new service with a shared (Arc-wrapped) store
    pub fn new_with_shared(store: Arc<QueueAclStore>, acls_enabled: bool) -> Self {
        info!(queues = store.len(), acls_enabled, "Initialized queue ACL service");

        Self {
            store,
            acls_enabled: Arc::new(AtomicBool::new(acls_enabled)),
            evaluator: AclEvaluator::new(),
        }
    }

    /// Create a service from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let store = QueueAclStore::from_config(config)?;
        Ok(Self::new(store, config.acls.enabled))
    }

    pub fn store(&self) -> &Arc<QueueAclStore> {
        &self.store
    }

    pub fn acls_enabled(&self) -> bool {
        self.acls_enabled.load(Ordering::Relaxed)
    }

    /// Switch ACL enforcement on or off for subsequent requests
    pub fn set_acls_enabled(&self, enabled: bool) {
        info!(enabled, "Queue ACL enforcement switched");
        self.acls_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Queue ACLs for an identity.
    ///
    /// The ACL switch is read once per call.
    #[instrument(skip(self), fields(user = identity.user()))]
    pub fn get_queue_acls(&self, identity: &Identity) -> Vec<QueueAclsInfo> {
        let acls_enabled = self.acls_enabled();
        let result = self
            .evaluator
            .compute_accessible_operations(identity, acls_enabled, &self.store);
        debug!(queues = result.len(), "Resolved queue ACLs");
        result
    }

    /// Check a single queue operation for an identity
    pub fn has_access(&self, identity: &Identity, queue: &str, operation: OperationKind) -> bool {
        self.evaluator
            .has_access(identity, self.acls_enabled(), &self.store, queue, operation)
    }

    /// Check a queue operation on a job owned by `job_owner`
    pub fn has_job_access(
        &self,
        identity: &Identity,
        queue: &str,
        operation: OperationKind,
        job_owner: &str,
    ) -> bool {
        self.evaluator.has_job_access(
            identity,
            self.acls_enabled(),
            &self.store,
            queue,
            operation,
            job_owner,
        )
    }
}
