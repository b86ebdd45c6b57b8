//! Queue ACL engine
//!
//! Resolves which operations a user may perform on each job queue of a
//! multi-queue job-submission system.
//!
//! ## Features
//!
//! - **Per-operation ACLs** for every queue: submit jobs, administer jobs
//! - **User, group and wildcard** grants (`user1,user2 group1,group2` or `*`)
//! - **Global switch** that bypasses all checks when ACLs are disabled
//! - **Flexible configuration** via TOML files, environment variables or
//!   flat properties
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
//! acl-administer-jobs = " admins"      # group only
//!
//! [queue.research]
//! acl-submit-job = "alice,bob researchers"
//! ```
//!
//! ## Example
//!
//! ```
//! use queue_acl::acl::{Identity, OperationKind, QueueAclStore};
//! use queue_acl::service::QueueAclService;
//!
//! let store = QueueAclStore::builder()
//!     .queue("default")
//!     .acl("default", OperationKind::SubmitJob, "*")
//!     .acl("default", OperationKind::AdministerJobs, " admins")
//!     .build()?;
//! let service = QueueAclService::new(store, true);
//!
//! let acls = service.get_queue_acls(&Identity::with_groups("carol", ["admins"]));
//! assert_eq!(acls[0].operation_names(), ["acl-submit-job", "acl-administer-jobs"]);
//! # Ok::<(), queue_acl::error::ConfigError>(())
//! ```

pub mod acl;
pub mod config;
pub mod error;
pub mod service;

// Re-export main types
pub use acl::{AclEvaluator, Identity, OperationKind, QueueAclStore, QueueAclsInfo};
pub use config::{AppConfig, load_config};
pub use error::ConfigError;
pub use service::QueueAclService;
