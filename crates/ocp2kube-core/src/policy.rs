//! `policy/v1beta1` PodSecurityPolicy
//!
//! The kind was removed from Kubernetes 1.25 and from `k8s-openapi`, so it is
//! modeled here for clusters that still serve it.

use k8s_openapi::api::core::v1::SELinuxOptions;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityPolicy {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: PodSecurityPolicySpec,
}

impl_resource!(
    PodSecurityPolicy,
    group = "policy",
    version = "v1beta1",
    kind = "PodSecurityPolicy",
    plural = "podsecuritypolicies",
    scope = k8s_openapi::ClusterResourceScope
);

impl PodSecurityPolicy {
    pub fn new(metadata: ObjectMeta, spec: PodSecurityPolicySpec) -> Self {
        use k8s_openapi::Resource;
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityPolicySpec {
    #[serde(default)]
    pub privileged: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_add_capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_drop_capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_flex_volumes: Option<Vec<AllowedFlexVolume>>,

    #[serde(default)]
    pub host_network: bool,

    #[serde(default, rename = "hostPID")]
    pub host_pid: bool,

    #[serde(default, rename = "hostIPC")]
    pub host_ipc: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_allow_privilege_escalation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,

    #[serde(default)]
    pub se_linux: SeLinuxStrategyOptions,

    #[serde(default)]
    pub run_as_user: RunAsUserStrategyOptions,

    #[serde(default)]
    pub supplemental_groups: GroupStrategyOptions,

    #[serde(default)]
    pub fs_group: GroupStrategyOptions,

    #[serde(default)]
    pub read_only_root_filesystem: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_unsafe_sysctls: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_sysctls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedFlexVolume {
    pub driver: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeLinuxStrategyOptions {
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub se_linux_options: Option<SELinuxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunAsUserStrategyOptions {
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<IdRange>>,
}

/// Shared shape of the `supplementalGroups` and `fsGroup` strategies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStrategyOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<IdRange>>,
}

/// Closed interval `[min, max]` of user or group IDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub min: i64,
    pub max: i64,
}
