//! Ingress → HTTPProxy translation
//!
//! Only the first rule is carried over: its host becomes the virtual host and
//! its paths become prefix-matched routes. Hosts of further rules are listed
//! in the `<caller>/unsupported-hosts` annotation.

use std::collections::BTreeMap;

use k8s_openapi::api::networking::v1::{HTTPIngressPath, Ingress, IngressRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use ocp2kube_core::contour::{HttpProxy, HttpProxySpec, MatchCondition, ProxyRoute, ProxyService, ProxyTls, VirtualHost};

use crate::config::TranslatorConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ConversionWarning, ConvertError, PortResolutionError, Result, ValidationError};
use crate::host::rewrite_host;

const INGRESS_KIND: &str = "Ingress";

/// Annotation name listing the hosts of ignored rules
pub const UNSUPPORTED_HOSTS: &str = "unsupported-hosts";

#[derive(Debug, Clone, Default)]
pub struct IngressTranslator {
    config: TranslatorConfig,
}

impl IngressTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn translate(&self, ingress: &Ingress, sink: &mut dyn DiagnosticSink) -> Result<HttpProxy> {
        let name = ingress.metadata.name.as_deref().unwrap_or_default();
        let spec = ingress.spec.as_ref();
        let rules = spec.and_then(|s| s.rules.as_deref()).unwrap_or_default();

        let Some(first) = rules.first() else {
            return Err(missing("spec.rules"));
        };
        let host = first.host.as_deref().filter(|h| !h.is_empty()).ok_or_else(|| missing("spec.rules[0].host"))?;

        let routes = first
            .http
            .as_ref()
            .map(|http| http.paths.iter().map(proxy_route).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        let mut annotations = BTreeMap::new();
        if rules.len() > 1 {
            let hosts = extra_hosts(&rules[1..]);
            tracing::info!("[{}] unsupported hosts: {}", self.config.caller_name, hosts);
            sink.emit(
                ConversionWarning::unsupported(INGRESS_KIND, name, "Spec.Rules")
                    .with_suggestion(&format!("Create one HTTPProxy per host for {}", hosts)),
            );
            annotations.insert(format!("{}/{}", self.config.caller_name, UNSUPPORTED_HOSTS), hosts);
        }

        let tls = spec
            .and_then(|s| s.tls.as_deref())
            .and_then(|tls| tls.first())
            .and_then(|entry| entry.secret_name.clone())
            .map(ProxyTls::with_secret);

        let metadata = ObjectMeta {
            name: ingress.metadata.name.clone(),
            namespace: ingress.metadata.namespace.clone(),
            annotations: if annotations.is_empty() { None } else { Some(annotations) },
            ..Default::default()
        };

        let spec = HttpProxySpec {
            virtual_host: Some(VirtualHost {
                fqdn: self.fqdn(name, host, sink),
                tls,
            }),
            routes,
        };

        Ok(HttpProxy::new(metadata, spec))
    }

    fn fqdn(&self, name: &str, host: &str, sink: &mut dyn DiagnosticSink) -> String {
        match &self.config.domain {
            Some(domain) => rewrite_host(host, domain),
            None => {
                tracing::warn!(
                    "[{}] no wildcard domain given; keeping host {}",
                    self.config.caller_name,
                    host
                );
                sink.emit(ConversionWarning::info(
                    INGRESS_KIND,
                    name,
                    "Spec.Rules.Host",
                    "kept the original host",
                ));
                host.to_string()
            }
        }
    }
}

fn missing(field: &str) -> ConvertError {
    ValidationError::MissingField {
        kind: INGRESS_KIND.to_string(),
        field: field.to_string(),
    }
    .into()
}

fn extra_hosts(rules: &[IngressRule]) -> String {
    rules
        .iter()
        .map(|rule| rule.host.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ")
}

fn proxy_route(path: &HTTPIngressPath) -> Result<ProxyRoute> {
    let Some(service) = path.backend.service.as_ref() else {
        return Err(missing("spec.rules[0].http.paths.backend.service"));
    };

    let port = service.port.as_ref();
    let number = port.and_then(|p| p.number).filter(|n| *n != 0);
    let Some(number) = number else {
        return Err(PortResolutionError {
            requested: port
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| "<unset>".to_string()),
            candidates: Vec::new(),
        }
        .into());
    };

    Ok(ProxyRoute {
        conditions: path
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| vec![MatchCondition::prefix(p)])
            .unwrap_or_default(),
        services: vec![ProxyService {
            name: service.name.clone(),
            port: number,
        }],
    })
}
