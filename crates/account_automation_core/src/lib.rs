//! Provider-agnostic account automation primitives.
//!
//! This crate owns the account-created event contract, handler configuration,
//! the quota reconciler, and support case templates. It intentionally excludes
//! AWS SDK and Lambda runtime concerns, which live in
//! `account_automation_lambda` behind the traits in [`collaborators`].

pub mod collaborators;
pub mod config;
pub mod contract;
pub mod error;
pub mod quota;
pub mod support_case;
