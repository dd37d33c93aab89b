//! AWS-oriented adapters and handlers for account-created automation.
//!
//! This crate owns runtime integration details (Lambda handlers, STS role
//! assumption, Service Quotas and Support clients) and wires them into the
//! provider-agnostic types from `account_automation_core`.

pub mod adapters;
pub mod handlers;
pub mod telemetry;
