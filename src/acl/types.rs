//! Access control types
//!
//! Core types used by the queue ACL engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation that can be authorized on a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    /// Submit a job to the queue
    #[serde(rename = "acl-submit-job")]
    SubmitJob,
    /// View, kill or reprioritize jobs in the queue
    #[serde(rename = "acl-administer-jobs")]
    AdministerJobs,
}

impl OperationKind {
    /// Get the fixed operation name.
    ///
    /// This is both the configuration key suffix (`queue.<name>.<op>`) and
    /// the name reported in [`QueueAclsInfo`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::SubmitJob => "acl-submit-job",
            OperationKind::AdministerJobs => "acl-administer-jobs",
        }
    }

    /// Try to parse an operation from its name (ASCII case-insensitive)
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether the owner of a job may perform this operation on it
    /// regardless of the queue ACL
    pub const fn is_job_owner_allowed(&self) -> bool {
        matches!(self, OperationKind::AdministerJobs)
    }

    /// Get all operations, in reporting order
    pub fn all() -> &'static [OperationKind] {
        &[OperationKind::SubmitJob, OperationKind::AdministerJobs]
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requesting principal
///
/// Resolved by the caller; the engine never authenticates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    user: String,
    groups: Vec<String>,
}

impl Identity {
    /// Create an identity with a user name and no groups
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            groups: Vec::new(),
        }
    }

    /// Create an identity with a user name and group memberships
    pub fn with_groups<I, S>(user: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user: user.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            write!(f, "{}", self.user)
        } else {
            write!(f, "{} ({})", self.user, self.groups.join(","))
        }
    }
}

/// Operations an identity may perform on one queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueAclsInfo {
    queue_name: String,
    operations: Vec<OperationKind>,
}

impl QueueAclsInfo {
    pub fn new(queue_name: impl Into<String>, operations: Vec<OperationKind>) -> Self {
        Self {
            queue_name: queue_name.into(),
            operations,
        }
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    pub fn operations(&self) -> &[OperationKind] {
        &self.operations
    }

    /// Operation names, as reported to clients
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations.iter().map(OperationKind::as_str).collect()
    }

    pub fn allows(&self, operation: OperationKind) -> bool {
        self.operations.contains(&operation)
    }
}
