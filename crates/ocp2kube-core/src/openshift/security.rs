//! `security.openshift.io/v1` SecurityContextConstraints
//!
//! Unlike most kinds, SCC fields sit at the top level of the object rather
//! than under a `spec`.

use k8s_openapi::api::core::v1::SELinuxOptions;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::policy::IdRange;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContextConstraints {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Admission ordering; no PodSecurityPolicy counterpart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    #[serde(default)]
    pub allow_privileged_container: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_add_capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_drop_capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_capabilities: Option<Vec<String>>,

    #[serde(default)]
    pub allow_host_dir_volume_plugin: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_flex_volumes: Option<Vec<AllowedFlexVolume>>,

    #[serde(default)]
    pub allow_host_network: bool,

    #[serde(default)]
    pub allow_host_ports: bool,

    #[serde(default, rename = "allowHostPID")]
    pub allow_host_pid: bool,

    #[serde(default, rename = "allowHostIPC")]
    pub allow_host_ipc: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_allow_privilege_escalation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,

    #[serde(default)]
    pub se_linux_context: SeLinuxContextStrategyOptions,

    #[serde(default)]
    pub run_as_user: RunAsUserStrategyOptions,

    #[serde(default)]
    pub supplemental_groups: SupplementalGroupsStrategyOptions,

    #[serde(default)]
    pub fs_group: FsGroupStrategyOptions,

    #[serde(default)]
    pub read_only_root_filesystem: bool,

    /// Users granted this SCC, including `system:serviceaccount:<ns>:<name>` entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_profiles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_unsafe_sysctls: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_sysctls: Option<Vec<String>>,
}

impl_resource!(
    SecurityContextConstraints,
    group = "security.openshift.io",
    version = "v1",
    kind = "SecurityContextConstraints",
    plural = "securitycontextconstraints",
    scope = k8s_openapi::ClusterResourceScope
);

impl SecurityContextConstraints {
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedFlexVolume {
    pub driver: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeLinuxContextStrategyOptions {
    /// `MustRunAs` or `RunAsAny`
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub se_linux_options: Option<SELinuxOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAsUserStrategyOptions {
    /// `MustRunAs`, `MustRunAsRange`, `MustRunAsNonRoot` or `RunAsAny`
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Fixed UID for `MustRunAs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_range_min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_range_max: Option<i64>,
}

impl RunAsUserStrategyOptions {
    /// The UID range, only when both bounds are set
    pub fn uid_range(&self) -> Option<IdRange> {
        match (self.uid_range_min, self.uid_range_max) {
            (Some(min), Some(max)) => Some(IdRange { min, max }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementalGroupsStrategyOptions {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<IdRange>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FsGroupStrategyOptions {
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<IdRange>>,
}
