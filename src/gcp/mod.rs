//! GCP API interaction module
//!
//! This module provides the core functionality for interacting with Google
//! Cloud Platform APIs, including authentication and the HTTP client shared
//! by the App Engine and Cloud Storage bindings.
//!
//! # Module Structure
//!
//! - [`auth`] - GCP authentication using Application Default Credentials
//! - [`client`] - Main GCP client for making API requests
//! - [`http`] - HTTP utilities for REST API calls

pub mod auth;
pub mod client;
pub mod http;
