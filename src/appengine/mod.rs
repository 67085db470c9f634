//! App Engine Admin API surface
//!
//! Everything the provider needs from the deployment backend: wire types
//! for the version descriptor, typed endpoint bindings, and the operation
//! poller.
//!
//! # Module Structure
//!
//! - [`version`] - version descriptor and version resource wire types
//! - [`api`] - create/get/delete bindings for modules, versions, operations
//! - [`operations`] - asynchronous operation handle and fixed-interval poller

pub mod api;
pub mod operations;
pub mod version;
