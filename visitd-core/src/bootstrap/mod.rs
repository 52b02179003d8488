//! Bootstrap module for initializing the visitd server
//!
//! This module handles:
//! - Configuration loading and validation
//! - Storage backend selection and provisioning

pub mod config;
pub mod database;

pub use config::load_config;
pub use database::init_store;
