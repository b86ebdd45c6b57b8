//! Queue access control
//!
//! Resolves which operations an identity may perform on each job queue.
//!
//! ## Access Control Model
//!
//! Every queue carries one ACL expression per [`OperationKind`]:
//!
//! - `*` grants the operation to everyone
//! - `user1,user2 group1,group2` grants it to the listed users and members
//!   of the listed groups (user list, space, group list)
//! - a missing or empty expression grants it to no one
//!
//! When ACLs are disabled globally, every identity may perform every
//! operation on every queue.
//!
//! ## Example Configuration
//!
//! ```toml
//! [acls]
//! enabled = true
//!
//! [queue]
//! names = "default,research"
//!
//! [queue.default]
//! acl-submit-job = "*"
//! acl-administer-jobs = " admins"
//!
//! [queue.research]
//! acl-submit-job = "alice,bob researchers"
//! acl-administer-jobs = "alice"
//! ```

pub mod evaluator;
pub mod list;
pub mod store;
pub mod types;

pub use evaluator::{AclEvaluator, compute_accessible_operations};
pub use list::{AccessControlList, WILDCARD_ACL_VALUE};
pub use store::{DEFAULT_QUEUE_NAME, QueueAclStore, QueueAclStoreBuilder, QueueAcls};
pub use types::{Identity, OperationKind, QueueAclsInfo};
