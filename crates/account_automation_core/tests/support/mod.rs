#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use account_automation_core::collaborators::{
    CredentialProvider, QuotaMutation, QuotaQuery, RequestHandle, ScopedCredentials,
};
use account_automation_core::error::{AutomationError, Result};
use account_automation_core::quota::QuotaSnapshot;

pub fn scoped_credentials(account_id: &str) -> ScopedCredentials {
    ScopedCredentials {
        access_key_id: format!("ASIA{account_id}"),
        secret_access_key: "secret".to_string(),
        session_token: "token".to_string(),
        expires_at: None,
    }
}

pub struct FakeCredentials {
    denied: bool,
    assumed: Mutex<Vec<String>>,
}

impl FakeCredentials {
    pub fn granting() -> Self {
        Self {
            denied: false,
            assumed: Mutex::new(Vec::new()),
        }
    }

    pub fn denying() -> Self {
        Self {
            denied: true,
            assumed: Mutex::new(Vec::new()),
        }
    }

    pub fn assumed(&self) -> Vec<String> {
        self.assumed.lock().expect("poisoned mutex").clone()
    }
}

impl CredentialProvider for FakeCredentials {
    fn assume_scoped_role(&self, account_id: &str) -> Result<ScopedCredentials> {
        self.assumed
            .lock()
            .expect("poisoned mutex")
            .push(account_id.to_string());
        if self.denied {
            return Err(AutomationError::Authorization(format!(
                "not authorized to assume role in {account_id}"
            )));
        }
        Ok(scoped_credentials(account_id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncreaseCall {
    pub access_key_id: String,
    pub region: String,
    pub service_code: String,
    pub quota_code: String,
    pub desired_value: f64,
}

/// In-memory quota store keyed by `(region, service_code, quota_code)`.
///
/// With `reflect_increases` set, a successful increase request is applied
/// immediately so the next read observes it.
pub struct FakeQuotas {
    values: Mutex<HashMap<(String, String, String), Option<f64>>>,
    query_error: Option<AutomationError>,
    mutation_error: Option<AutomationError>,
    reflect_increases: bool,
    queries: Mutex<Vec<(String, String, String)>>,
    increases: Mutex<Vec<IncreaseCall>>,
}

impl FakeQuotas {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            query_error: None,
            mutation_error: None,
            reflect_increases: false,
            queries: Mutex::new(Vec::new()),
            increases: Mutex::new(Vec::new()),
        }
    }

    pub fn with_value(self, region: &str, service_code: &str, quota_code: &str, value: f64) -> Self {
        self.set(region, service_code, quota_code, Some(value));
        self
    }

    pub fn with_unknown_value(self, region: &str, service_code: &str, quota_code: &str) -> Self {
        self.set(region, service_code, quota_code, None);
        self
    }

    pub fn failing_queries(mut self, error: AutomationError) -> Self {
        self.query_error = Some(error);
        self
    }

    pub fn failing_increases(mut self, error: AutomationError) -> Self {
        self.mutation_error = Some(error);
        self
    }

    pub fn reflecting_increases(mut self) -> Self {
        self.reflect_increases = true;
        self
    }

    /// `(region, service_code, quota_code)` of every read, in call order.
    pub fn queries(&self) -> Vec<(String, String, String)> {
        self.queries.lock().expect("poisoned mutex").clone()
    }

    pub fn increases(&self) -> Vec<IncreaseCall> {
        self.increases.lock().expect("poisoned mutex").clone()
    }

    fn set(&self, region: &str, service_code: &str, quota_code: &str, value: Option<f64>) {
        self.values.lock().expect("poisoned mutex").insert(
            (
                region.to_string(),
                service_code.to_string(),
                quota_code.to_string(),
            ),
            value,
        );
    }
}

impl QuotaQuery for FakeQuotas {
    fn get_quota(
        &self,
        _credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaSnapshot> {
        let key = (
            region.to_string(),
            service_code.to_string(),
            quota_code.to_string(),
        );
        self.queries
            .lock()
            .expect("poisoned mutex")
            .push(key.clone());

        if let Some(error) = &self.query_error {
            return Err(error.clone());
        }

        match self.values.lock().expect("poisoned mutex").get(&key) {
            Some(Some(value)) => Ok(QuotaSnapshot::known(*value)),
            Some(None) => Ok(QuotaSnapshot::unknown()),
            None => Err(AutomationError::NotFound(format!(
                "no quota {service_code}/{quota_code} in {region}"
            ))),
        }
    }
}

impl QuotaMutation for FakeQuotas {
    fn request_quota_increase(
        &self,
        credentials: &ScopedCredentials,
        region: &str,
        service_code: &str,
        quota_code: &str,
        desired_value: f64,
    ) -> Result<RequestHandle> {
        let mut increases = self.increases.lock().expect("poisoned mutex");
        increases.push(IncreaseCall {
            access_key_id: credentials.access_key_id.clone(),
            region: region.to_string(),
            service_code: service_code.to_string(),
            quota_code: quota_code.to_string(),
            desired_value,
        });

        if let Some(error) = &self.mutation_error {
            return Err(error.clone());
        }

        if self.reflect_increases {
            self.set(region, service_code, quota_code, Some(desired_value));
        }
        Ok(RequestHandle::new(format!("req-{}", increases.len())))
    }
}
