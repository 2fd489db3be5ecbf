//! `apps.openshift.io/v1` DeploymentConfig

use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: DeploymentConfigSpec,

    #[serde(default)]
    pub status: DeploymentConfigStatus,
}

impl_resource!(
    DeploymentConfig,
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    plural = "deploymentconfigs",
    scope = k8s_openapi::NamespaceResourceScope
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub strategy: DeploymentStrategy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ready_seconds: Option<i32>,

    /// Image and config-change triggers; kept opaque since nothing maps them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    pub replicas: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,

    #[serde(default)]
    pub test: bool,

    #[serde(default)]
    pub paused: bool,

    /// Plain label map, not a `LabelSelector`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStrategy {
    #[serde(default, rename = "type", skip_serializing_if = "DeploymentStrategyType::is_unset")]
    pub type_: DeploymentStrategyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_params: Option<RollingDeploymentStrategyParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recreate_params: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_params: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
}

/// Source strategy type; unknown values are carried in `Other`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentStrategyType {
    #[default]
    Unset,
    Rolling,
    Recreate,
    Custom,
    Other(String),
}

impl DeploymentStrategyType {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Rolling => "Rolling",
            Self::Recreate => "Recreate",
            Self::Custom => "Custom",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for DeploymentStrategyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => Self::Unset,
            "Rolling" => Self::Rolling,
            "Recreate" => Self::Recreate,
            "Custom" => Self::Custom,
            _ => Self::Other(value),
        }
    }
}

impl From<DeploymentStrategyType> for String {
    fn from(value: DeploymentStrategyType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingDeploymentStrategyParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_period_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigStatus {
    #[serde(default)]
    pub latest_version: i64,

    #[serde(default)]
    pub observed_generation: i64,

    #[serde(default)]
    pub replicas: i32,

    #[serde(default)]
    pub updated_replicas: i32,

    #[serde(default)]
    pub available_replicas: i32,

    #[serde(default)]
    pub unavailable_replicas: i32,

    #[serde(default)]
    pub ready_replicas: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<DeploymentCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentCondition {
    #[serde(rename = "type")]
    pub type_: String,

    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<Time>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy_types() {
        for (raw, expected) in [
            ("Rolling", DeploymentStrategyType::Rolling),
            ("Recreate", DeploymentStrategyType::Recreate),
            ("Custom", DeploymentStrategyType::Custom),
            ("Blue", DeploymentStrategyType::Other("Blue".to_string())),
        ] {
            let json = format!(r#"{{ "type": "{}" }}"#, raw);
            let strategy: DeploymentStrategy = serde_json::from_str(&json).unwrap();
            assert_eq!(strategy.type_, expected);
        }

        let strategy: DeploymentStrategy = serde_json::from_str("{}").unwrap();
        assert!(strategy.type_.is_unset());
    }

    #[test]
    fn test_parse_deployment_config() {
        let content = r#"{
            "kind": "DeploymentConfig",
            "metadata": { "name": "api", "namespace": "shop" },
            "spec": {
                "replicas": 3,
                "selector": { "app": "api" },
                "strategy": {
                    "type": "Rolling",
                    "rollingParams": { "maxSurge": "25%", "maxUnavailable": 1, "intervalSeconds": 1 }
                },
                "triggers": [{ "type": "ConfigChange" }]
            },
            "status": {
                "replicas": 3,
                "conditions": [{
                    "type": "Available",
                    "status": "True",
                    "lastTransitionTime": "2020-01-01T00:00:00Z"
                }]
            }
        }"#;
        let dc: DeploymentConfig = serde_json::from_str(content).unwrap();

        assert_eq!(dc.spec.replicas, 3);
        assert_eq!(dc.spec.selector.as_ref().unwrap()["app"], "api");
        let params = dc.spec.strategy.rolling_params.as_ref().unwrap();
        assert_eq!(params.max_surge, Some(IntOrString::String("25%".to_string())));
        assert_eq!(params.max_unavailable, Some(IntOrString::Int(1)));
        assert_eq!(dc.status.conditions[0].type_, "Available");
        assert!(dc.status.conditions[0].last_transition_time.is_some());
    }
}
