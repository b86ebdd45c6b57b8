//! Service module
//!
//! Exposes queue ACL resolution to callers such as RPC handlers or the CLI.

pub mod handler;

pub use handler::QueueAclService;
