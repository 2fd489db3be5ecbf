//! Translator configuration
//!
//! Everything a translator needs besides its input resources is passed in
//! here: the caller name used to namespace annotation keys, the optional
//! domain rewrite, naming conventions, and the subject classification rules.
//! `Settings` is the on-disk form, read from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::subjects::SubjectRules;

/// Default caller name used to prefix annotation keys
pub const DEFAULT_CALLER_NAME: &str = "ocp2kube";

/// Settings shared by every translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Identifies the calling client; becomes the annotation key prefix
    pub caller_name: String,
    /// Replacement wildcard domain (`example.com`, `.example.com` or `*.example.com`)
    pub domain: Option<String>,
}

impl TranslatorConfig {
    pub fn new(caller_name: impl Into<String>) -> Self {
        Self {
            caller_name: caller_name.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.domain = if domain.is_empty() { None } else { Some(domain) };
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CALLER_NAME)
    }
}

/// Naming of Secrets materialized from inline Route certificates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretNaming {
    pub prefix: String,
}

impl SecretNaming {
    pub fn secret_name(&self, route_name: &str) -> String {
        format!("{}{}", self.prefix, route_name)
    }
}

impl Default for SecretNaming {
    fn default() -> Self {
        Self {
            prefix: "hpsecret-".to_string(),
        }
    }
}

/// Naming of the ClusterRole and ClusterRoleBinding generated per policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbacNaming {
    pub role_prefix: String,
}

impl RbacNaming {
    pub fn role_name(&self, policy_name: &str) -> String {
        format!("{}{}", self.role_prefix, policy_name)
    }
}

impl Default for RbacNaming {
    fn default() -> Self {
        Self {
            role_prefix: "vmware-psp:".to_string(),
        }
    }
}

/// Settings file
///
/// ```yaml
/// callerName: migration-team
/// domain: "*.apps.example.com"
/// exclusionPattern: "openshift|velero|management-infra"
/// rolePrefix: "psp:"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_prefix: Option<String>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn translator_config(&self) -> TranslatorConfig {
        let config = TranslatorConfig::new(
            self.caller_name
                .clone()
                .unwrap_or_else(|| DEFAULT_CALLER_NAME.to_string()),
        );
        match &self.domain {
            Some(domain) => config.with_domain(domain.clone()),
            None => config,
        }
    }

    /// Subject rules; unset patterns fall back to the defaults
    pub fn subject_rules(&self) -> Result<SubjectRules> {
        let defaults = SubjectRules::default();
        SubjectRules::new(
            self.exclusion_pattern
                .as_deref()
                .unwrap_or(defaults.exclusion_pattern()),
            self.service_account_pattern
                .as_deref()
                .unwrap_or(defaults.service_account_pattern()),
        )
    }

    pub fn rbac_naming(&self) -> RbacNaming {
        self.role_prefix
            .clone()
            .map(|role_prefix| RbacNaming { role_prefix })
            .unwrap_or_default()
    }

    pub fn secret_naming(&self) -> SecretNaming {
        self.secret_prefix
            .clone()
            .map(|prefix| SecretNaming { prefix })
            .unwrap_or_default()
    }
}
