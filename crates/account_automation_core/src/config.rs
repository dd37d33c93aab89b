//! Handler configuration, resolved once at cold start.
//!
//! Each config is built from a key lookup so tests never touch the process
//! environment; the Lambda binaries call `from_env`.

use serde::{Deserialize, Serialize};

use crate::error::{AutomationError, Result};
use crate::quota::{default_quota_targets, QuotaTarget};

pub const LIMIT_REQUEST_REGIONS_VAR: &str = "LimitRequestRegions";
pub const LIMIT_REQUEST_TARGETS_VAR: &str = "LimitRequestTargets";
pub const REFERENCE_ACCOUNT_VAR: &str = "ReferenceAccount";
pub const ALIGNMENT_REGIONS_VAR: &str = "AlignmentRegions";
pub const CC_EMAIL_ADDRESSES_VAR: &str = "ccEmailAddresses";
pub const SUPPORT_PLAN_VAR: &str = "SupportPlan";
pub const ASSUME_ROLE_NAME_VAR: &str = "AssumeRoleName";
pub const ASSUME_ROLE_SESSION_NAME_VAR: &str = "AssumeRoleSessionName";

pub const DEFAULT_ROLE_NAME: &str = "OrganizationAccountAccessRole";
pub const DEFAULT_SESSION_NAME: &str = "account-automation";
pub const DEFAULT_ALIGNMENT_REGIONS: [&str; 8] = [
    "eu-west-1",
    "sa-east-1",
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "ap-northeast-1",
    "ap-southeast-1",
    "ap-southeast-2",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleConfig {
    pub role_name: String,
    pub session_name: String,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            role_name: DEFAULT_ROLE_NAME.to_string(),
            session_name: DEFAULT_SESSION_NAME.to_string(),
        }
    }
}

impl RoleConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            role_name: optional(lookup, ASSUME_ROLE_NAME_VAR).unwrap_or(defaults.role_name),
            session_name: optional(lookup, ASSUME_ROLE_SESSION_NAME_VAR)
                .unwrap_or(defaults.session_name),
        }
    }

    pub fn role_arn(&self, account_id: &str) -> String {
        format!("arn:aws:iam::{account_id}:role/{}", self.role_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitIncreaseConfig {
    pub regions: Vec<String>,
    pub targets: Vec<QuotaTarget>,
    pub role: RoleConfig,
}

impl LimitIncreaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let regions = split_list(&required(&lookup, LIMIT_REQUEST_REGIONS_VAR)?);
        if regions.is_empty() {
            return Err(AutomationError::Configuration(format!(
                "{LIMIT_REQUEST_REGIONS_VAR} must list at least one region"
            )));
        }

        let targets = match optional(&lookup, LIMIT_REQUEST_TARGETS_VAR) {
            Some(raw) => parse_targets(&raw)?,
            None => default_quota_targets(),
        };

        Ok(Self {
            regions,
            targets,
            role: RoleConfig::from_lookup(&lookup),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AzAlignmentConfig {
    pub reference_account: String,
    pub regions: Vec<String>,
    pub cc_email_addresses: Vec<String>,
    pub role: RoleConfig,
}

impl AzAlignmentConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let regions = match optional(&lookup, ALIGNMENT_REGIONS_VAR) {
            Some(raw) => split_list(&raw),
            None => Vec::new(),
        };
        let regions = if regions.is_empty() {
            DEFAULT_ALIGNMENT_REGIONS
                .iter()
                .map(|region| region.to_string())
                .collect()
        } else {
            regions
        };

        Ok(Self {
            reference_account: required(&lookup, REFERENCE_ACCOUNT_VAR)?,
            regions,
            cc_email_addresses: cc_email_addresses(&lookup)?,
            role: RoleConfig::from_lookup(&lookup),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnableSupportConfig {
    pub support_plan: String,
    pub cc_email_addresses: Vec<String>,
    pub role: RoleConfig,
}

impl EnableSupportConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            support_plan: required(&lookup, SUPPORT_PLAN_VAR)?,
            cc_email_addresses: cc_email_addresses(&lookup)?,
            role: RoleConfig::from_lookup(&lookup),
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    optional(lookup, key)
        .ok_or_else(|| AutomationError::Configuration(format!("{key} must be configured")))
}

fn cc_email_addresses(lookup: &impl Fn(&str) -> Option<String>) -> Result<Vec<String>> {
    let addresses = split_list(&required(lookup, CC_EMAIL_ADDRESSES_VAR)?);
    if let Some(invalid) = addresses.iter().find(|address| !address.contains('@')) {
        return Err(AutomationError::Configuration(format!(
            "{CC_EMAIL_ADDRESSES_VAR} contains an invalid address: '{invalid}'"
        )));
    }
    Ok(addresses)
}

/// Splits a comma-separated list, trimming entries and dropping blanks and
/// repeats while keeping first-seen order.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        if !values.iter().any(|existing| existing == entry) {
            values.push(entry.to_string());
        }
    }
    values
}

fn parse_targets(raw: &str) -> Result<Vec<QuotaTarget>> {
    let targets: Vec<QuotaTarget> = serde_json::from_str(raw).map_err(|error| {
        AutomationError::Configuration(format!("{LIMIT_REQUEST_TARGETS_VAR} is not valid JSON: {error}"))
    })?;
    if targets.is_empty() {
        return Err(AutomationError::Configuration(format!(
            "{LIMIT_REQUEST_TARGETS_VAR} must contain at least one target"
        )));
    }
    for target in &targets {
        target.validate()?;
    }
    Ok(targets)
}
