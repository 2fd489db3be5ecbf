//! `route.openshift.io/v1` Route

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};

/// An OpenShift Route exposing a Service under a host name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: RouteSpec,
}

impl_resource!(
    Route,
    group = "route.openshift.io",
    version = "v1",
    kind = "Route",
    plural = "routes",
    scope = k8s_openapi::NamespaceResourceScope
);

impl Route {
    /// Build a Route with its type metadata filled in
    pub fn new(metadata: ObjectMeta, spec: RouteSpec) -> Self {
        use k8s_openapi::Resource;
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    /// Public host name; an empty host lets the router generate one
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,

    /// Path prefix the router matches before forwarding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Primary backend
    #[serde(default)]
    pub to: RouteTargetReference,

    /// Additional weighted backends
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_backends: Vec<RouteTargetReference>,

    /// Target port on the backing Service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<RoutePort>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,

    /// `None` or `Subdomain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_policy: Option<String>,
}

/// Reference to the object a Route forwards to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteTargetReference {
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

/// Port selector; either a Service port name or a numeric target port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    pub target_port: IntOrString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    pub termination: TlsTermination,

    /// PEM certificate served by the router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,

    /// PEM private key for `certificate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<String>,

    /// CA used to validate the backend during re-encryption
    #[serde(
        default,
        rename = "destinationCACertificate",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_ca_certificate: Option<String>,

    /// `Allow`, `Redirect` or `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_edge_termination_policy: Option<String>,
}

impl TlsConfig {
    pub fn new(termination: TlsTermination) -> Self {
        Self {
            termination,
            certificate: None,
            key: None,
            ca_certificate: None,
            destination_ca_certificate: None,
            insecure_edge_termination_policy: None,
        }
    }

    /// Certificate and key, when both are present and non-empty
    pub fn inline_material(&self) -> Option<(&str, &str)> {
        match (self.certificate.as_deref(), self.key.as_deref()) {
            (Some(cert), Some(key)) if !cert.is_empty() && !key.is_empty() => Some((cert, key)),
            _ => None,
        }
    }
}

/// TLS termination mode of a Route
///
/// Unknown values are kept verbatim in `Other` so that decoding never fails
/// on a mode this crate does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TlsTermination {
    Edge,
    Passthrough,
    Reencrypt,
    Other(String),
}

impl TlsTermination {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Edge => "edge",
            Self::Passthrough => "passthrough",
            Self::Reencrypt => "reencrypt",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TlsTermination {
    fn from(value: String) -> Self {
        match value.as_str() {
            "edge" => Self::Edge,
            "passthrough" => Self::Passthrough,
            "reencrypt" => Self::Reencrypt,
            _ => Self::Other(value),
        }
    }
}

impl From<TlsTermination> for String {
    fn from(value: TlsTermination) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for TlsTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
