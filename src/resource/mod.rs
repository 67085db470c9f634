//! Resource abstraction layer
//!
//! Binds the declarative schema to the App Engine backend: configuration
//! types and validation, descriptor assembly, and the lifecycle entry
//! points the provider host drives.
//!
//! # Module Structure
//!
//! - [`schema`] - declared attributes, defaults, runtime set, validation
//! - [`deployment`] - deployment version assembly and handler sets
//! - [`app_version`] - create/read/delete lifecycle orchestration

pub mod app_version;
pub mod deployment;
pub mod schema;

pub use app_version::{create, delete, read};
pub use schema::{ResourceConfig, ResourceState, Runtime, ScalingConfig};
