//! Contour `projectcontour.io/v1` HTTPProxy
//!
//! Only the subset the converters emit is modeled: a virtual host with
//! optional TLS and a list of prefix-matched routes.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpProxy {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: HttpProxySpec,
}

impl_resource!(
    HttpProxy,
    group = "projectcontour.io",
    version = "v1",
    kind = "HTTPProxy",
    plural = "httpproxies",
    scope = k8s_openapi::NamespaceResourceScope
);

impl HttpProxy {
    pub fn new(metadata: ObjectMeta, spec: HttpProxySpec) -> Self {
        use k8s_openapi::Resource;
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }

    /// TLS block of the virtual host, if any
    pub fn tls(&self) -> Option<&ProxyTls> {
        self.spec.virtual_host.as_ref().and_then(|vh| vh.tls.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpProxySpec {
    #[serde(rename = "virtualhost", default, skip_serializing_if = "Option::is_none")]
    pub virtual_host: Option<VirtualHost>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<ProxyRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualHost {
    pub fqdn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<ProxyTls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyTls {
    /// Secret holding `tls.crt` and `tls.key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,

    /// Forward the TLS stream to the backend untouched
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub passthrough: bool,
}

impl ProxyTls {
    pub fn passthrough() -> Self {
        Self {
            secret_name: None,
            passthrough: true,
        }
    }

    pub fn with_secret(name: impl Into<String>) -> Self {
        Self {
            secret_name: Some(name.into()),
            passthrough: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyRoute {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<MatchCondition>,

    pub services: Vec<ProxyService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl MatchCondition {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

/// Upstream Service and port traffic is sent to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyService {
    pub name: String,
    pub port: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_proxy() {
        let proxy = HttpProxy::new(
            ObjectMeta {
                name: Some("web".to_string()),
                ..Default::default()
            },
            HttpProxySpec {
                virtual_host: Some(VirtualHost {
                    fqdn: "web.example.com".to_string(),
                    tls: Some(ProxyTls::passthrough()),
                }),
                routes: vec![ProxyRoute {
                    conditions: vec![MatchCondition::prefix("/")],
                    services: vec![ProxyService {
                        name: "web".to_string(),
                        port: 8080,
                    }],
                }],
            },
        );
        let json = serde_json::to_value(&proxy).unwrap();

        assert_eq!(json["apiVersion"], "projectcontour.io/v1");
        assert_eq!(json["kind"], "HTTPProxy");
        assert_eq!(json["spec"]["virtualhost"]["fqdn"], "web.example.com");
        assert_eq!(json["spec"]["virtualhost"]["tls"]["passthrough"], true);
        assert!(json["spec"]["virtualhost"]["tls"].get("secretName").is_none());
        assert_eq!(json["spec"]["routes"][0]["services"][0]["port"], 8080);
    }

    #[test]
    fn test_secret_tls_omits_passthrough() {
        let json = serde_json::to_value(ProxyTls::with_secret("hpsecret-web")).unwrap();
        assert_eq!(json, serde_json::json!({ "secretName": "hpsecret-web" }));
    }
}
