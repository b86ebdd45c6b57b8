//! Queue ACL evaluation
//!
//! Computes, for an identity, the operations it may perform on each queue.
//! Evaluation is a pure read over a [`QueueAclStore`]; it never fails and
//! never reports denial as an error.

use crate::acl::store::QueueAclStore;
use crate::acl::types::{Identity, OperationKind, QueueAclsInfo};
use tracing::{debug, trace};

/// Stateless evaluator over a [`QueueAclStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AclEvaluator;

impl AclEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the operations `identity` may perform on every queue.
    ///
    /// With ACLs disabled every queue is returned with every operation.
    /// Otherwise queues granting nothing are omitted. Order follows the
    /// store's queue order.
    pub fn compute_accessible_operations(
        &self,
        identity: &Identity,
        acls_enabled: bool,
        store: &QueueAclStore,
    ) -> Vec<QueueAclsInfo> {
        debug!(
            identity = %identity,
            acls_enabled,
            queues = store.len(),
            "Computing queue ACLs"
        );

        if !acls_enabled {
            return store
                .queue_names()
                .iter()
                .map(|name| QueueAclsInfo::new(name.as_str(), OperationKind::all().to_vec()))
                .collect();
        }

        store
            .queue_names()
            .iter()
            .filter_map(|name| {
                let operations: Vec<OperationKind> = OperationKind::all()
                    .iter()
                    .copied()
                    .filter(|&op| self.is_allowed(identity, store, name, op))
                    .collect();

                if operations.is_empty() {
                    trace!(queue = %name, "No operations allowed, omitting queue");
                    None
                } else {
                    Some(QueueAclsInfo::new(name.as_str(), operations))
                }
            })
            .collect()
    }

    /// Check a single queue operation.
    ///
    /// Unknown queues and unconfigured operations are denied when ACLs are
    /// enabled.
    pub fn has_access(
        &self,
        identity: &Identity,
        acls_enabled: bool,
        store: &QueueAclStore,
        queue: &str,
        operation: OperationKind,
    ) -> bool {
        if !acls_enabled {
            return true;
        }
        self.is_allowed(identity, store, queue, operation)
    }

    /// Check a queue operation on a specific job.
    ///
    /// The job owner is allowed operations flagged by
    /// [`OperationKind::is_job_owner_allowed`] even when the queue ACL does
    /// not name them.
    pub fn has_job_access(
        &self,
        identity: &Identity,
        acls_enabled: bool,
        store: &QueueAclStore,
        queue: &str,
        operation: OperationKind,
        job_owner: &str,
    ) -> bool {
        if !acls_enabled {
            return true;
        }

        if operation.is_job_owner_allowed()
            && !job_owner.is_empty()
            && identity.user() == job_owner
        {
            trace!(queue, operation = %operation, owner = job_owner, "Allowed as job owner");
            return true;
        }

        self.is_allowed(identity, store, queue, operation)
    }

    fn is_allowed(
        &self,
        identity: &Identity,
        store: &QueueAclStore,
        queue: &str,
        operation: OperationKind,
    ) -> bool {
        let allowed = store
            .acl(queue, operation)
            .is_some_and(|acl| acl.is_user_allowed(identity));

        trace!(queue, operation = %operation, allowed, "Evaluated queue ACL");
        allowed
    }
}

/// Compute the operations `identity` may perform on every queue
pub fn compute_accessible_operations(
    identity: &Identity,
    acls_enabled: bool,
    store: &QueueAclStore,
) -> Vec<QueueAclsInfo> {
    AclEvaluator::new().compute_accessible_operations(identity, acls_enabled, store)
}
