//! Route → HTTPProxy translation
//!
//! A Route and the Service it targets become one Contour HTTPProxy, plus a
//! TLS Secret when the Route terminates TLS with inline certificate material.
//!
//! Translation is all-or-nothing: the pair is validated and the backend port
//! resolved before anything is built, so an error never comes with a
//! half-populated proxy.

use k8s_openapi::api::core::v1::{Secret, Service, ServicePort};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use ocp2kube_core::contour::{HttpProxy, HttpProxySpec, MatchCondition, ProxyRoute, ProxyService, ProxyTls, VirtualHost};
use ocp2kube_core::openshift::Route;

use crate::annotations::{self, FieldFact, FieldFacts};
use crate::config::{SecretNaming, TranslatorConfig};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ConversionWarning, Result, ValidationError};
use crate::host::rewrite_host;
use crate::ports::resolve_port;
use crate::remap::{OmitReason, TlsPlan, tls_plan};
use crate::secret::materialize_secret;

const ROUTE_KIND: &str = "Route";
const SERVICE_KIND: &str = "Service";

/// Route fields an HTTPProxy cannot express
pub fn route_facts() -> FieldFacts<Route> {
    FieldFacts::new(ROUTE_KIND)
        .fact(FieldFact::new("Spec.WildCardPolicy", |r: &Route| {
            r.spec
                .wildcard_policy
                .as_deref()
                .is_some_and(|policy| !policy.is_empty() && policy != "None")
        }))
        .fact(FieldFact::new("Spec.Weight", |r: &Route| r.spec.to.weight.is_some()))
        .fact(FieldFact::new("Spec.AlternateBackends", |r: &Route| {
            !r.spec.alternate_backends.is_empty()
        }))
        .fact(FieldFact::new("Spec.InsecureEdgeTerminationPolicy", |r: &Route| {
            r.spec
                .tls
                .as_ref()
                .and_then(|tls| tls.insecure_edge_termination_policy.as_deref())
                .is_some_and(|policy| !policy.is_empty())
        }))
        .fact(FieldFact::new("Spec.DestinationCACertificate", |r: &Route| {
            r.spec
                .tls
                .as_ref()
                .and_then(|tls| tls.destination_ca_certificate.as_deref())
                .is_some_and(|ca| !ca.is_empty())
        }))
        .fact(FieldFact::new("Spec.CACertificate", |r: &Route| {
            r.spec
                .tls
                .as_ref()
                .and_then(|tls| tls.ca_certificate.as_deref())
                .is_some_and(|ca| !ca.is_empty())
        }))
}

/// HTTPProxy and optional TLS Secret produced from one Route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutput {
    pub proxy: HttpProxy,
    pub secret: Option<Secret>,
}

/// Translates Routes into Contour HTTPProxies
#[derive(Debug, Clone)]
pub struct RouteTranslator {
    config: TranslatorConfig,
    facts: FieldFacts<Route>,
    secret_naming: SecretNaming,
}

impl RouteTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            facts: route_facts(),
            secret_naming: SecretNaming::default(),
        }
    }

    /// Replace the unsupported-field table
    pub fn with_facts(mut self, facts: FieldFacts<Route>) -> Self {
        self.facts = facts;
        self
    }

    pub fn with_secret_naming(mut self, naming: SecretNaming) -> Self {
        self.secret_naming = naming;
        self
    }

    /// Translate `route`, whose backend is `service`
    ///
    /// # Errors
    ///
    /// - `ValidationError` when the Route and Service do not belong together
    ///   or the Service has no ports
    /// - `PortResolutionError` when the Route's port reference matches no
    ///   Service port
    pub fn translate(
        &self,
        route: &Route,
        service: &Service,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<RouteOutput> {
        let caller = &self.config.caller_name;
        tracing::debug!("[{}] translating Route {}/{}", caller, route.namespace(), route.name());

        validate(route, service)?;
        let port = resolve_port(route.spec.port.as_ref(), service_ports(service))?;

        let recorded = annotations::record(caller, route.name(), &self.facts, route, sink);
        self.report_advisories(route, sink);

        let (tls, secret) = self.plan_tls(route, sink);

        let proxy_route = ProxyRoute {
            conditions: route
                .spec
                .path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| vec![MatchCondition::prefix(path)])
                .unwrap_or_default(),
            services: vec![ProxyService {
                name: service_name(service).to_string(),
                port,
            }],
        };

        let metadata = ObjectMeta {
            name: route.metadata.name.clone(),
            namespace: route.metadata.namespace.clone(),
            labels: route.metadata.labels.clone(),
            annotations: annotations::merge_into_meta(route.metadata.annotations.clone(), recorded),
            ..Default::default()
        };

        let spec = HttpProxySpec {
            virtual_host: Some(VirtualHost {
                fqdn: self.fqdn(route, sink),
                tls,
            }),
            routes: vec![proxy_route],
        };

        Ok(RouteOutput {
            proxy: HttpProxy::new(metadata, spec),
            secret,
        })
    }

    fn fqdn(&self, route: &Route, sink: &mut dyn DiagnosticSink) -> String {
        match &self.config.domain {
            Some(domain) => {
                let fqdn = rewrite_host(&route.spec.host, domain);
                tracing::debug!("[{}] FQDN set to {}", self.config.caller_name, fqdn);
                fqdn
            }
            None => {
                tracing::warn!(
                    "[{}] no wildcard domain given; keeping host {}",
                    self.config.caller_name,
                    route.spec.host
                );
                sink.emit(
                    ConversionWarning::info(ROUTE_KIND, route.name(), "Spec.Host", "kept the original host")
                        .with_suggestion("Pass a domain to rehost the route"),
                );
                route.spec.host.clone()
            }
        }
    }

    fn plan_tls(&self, route: &Route, sink: &mut dyn DiagnosticSink) -> (Option<ProxyTls>, Option<Secret>) {
        match tls_plan(route.spec.tls.as_ref()) {
            TlsPlan::Passthrough => (Some(ProxyTls::passthrough()), None),
            TlsPlan::Terminate { certificate, key } => {
                let name = self.secret_naming.secret_name(route.name());
                tracing::debug!("[{}] materializing Secret {}", self.config.caller_name, name);
                let secret = materialize_secret(&name, route.namespace(), &certificate, &key);
                (Some(ProxyTls::with_secret(name)), Some(secret))
            }
            TlsPlan::Omit(OmitReason::NoTls) => (None, None),
            TlsPlan::Omit(OmitReason::NoInlineMaterial(termination)) => {
                sink.emit(
                    ConversionWarning::warning(
                        ROUTE_KIND,
                        route.name(),
                        "Spec.TLS",
                        &format!("{} termination without inline certificate and key; TLS omitted", termination),
                    )
                    .with_suggestion("Create the TLS Secret by hand and reference it from the HTTPProxy"),
                );
                (None, None)
            }
            TlsPlan::Omit(OmitReason::UnknownTermination(termination)) => {
                sink.emit(ConversionWarning::warning(
                    ROUTE_KIND,
                    route.name(),
                    "Spec.TLS.Termination",
                    &format!("unknown termination '{}'; TLS omitted", termination),
                ));
                (None, None)
            }
        }
    }

    fn report_advisories(&self, route: &Route, sink: &mut dyn DiagnosticSink) {
        let allows_insecure = route
            .spec
            .tls
            .as_ref()
            .and_then(|tls| tls.insecure_edge_termination_policy.as_deref())
            == Some("Allow");

        if allows_insecure {
            tracing::warn!(
                "[{}] Route {} allows insecure traffic; HTTPProxy redirects to HTTPS",
                self.config.caller_name,
                route.name()
            );
            sink.emit(
                ConversionWarning::warning(
                    ROUTE_KIND,
                    route.name(),
                    "Spec.TLS.InsecureEdgeTerminationPolicy",
                    "Allow is not honored; plain HTTP is redirected to HTTPS",
                )
                .with_suggestion("Set permitInsecure on the HTTPProxy route if plain HTTP must keep working"),
            );
        }
    }
}

impl Default for RouteTranslator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

fn service_name(service: &Service) -> &str {
    service.metadata.name.as_deref().unwrap_or_default()
}

fn service_ports(service: &Service) -> &[ServicePort] {
    service
        .spec
        .as_ref()
        .and_then(|spec| spec.ports.as_deref())
        .unwrap_or_default()
}

fn validate(route: &Route, service: &Service) -> std::result::Result<(), ValidationError> {
    let service_namespace = service.metadata.namespace.as_deref().unwrap_or_default();
    if service_namespace != route.namespace() {
        return Err(ValidationError::NamespaceMismatch {
            route: route.namespace().to_string(),
            service: service_namespace.to_string(),
        });
    }

    if service_name(service) != route.spec.to.name {
        return Err(ValidationError::ServiceNameMismatch {
            expected: route.spec.to.name.clone(),
            found: service_name(service).to_string(),
        });
    }

    // An empty kind defaults to Service
    if !route.spec.to.kind.is_empty() && route.spec.to.kind != SERVICE_KIND {
        return Err(ValidationError::UnsupportedTargetKind {
            kind: route.spec.to.kind.clone(),
        });
    }

    if service_ports(service).is_empty() {
        return Err(ValidationError::NoServicePorts {
            service: service_name(service).to_string(),
        });
    }

    Ok(())
}
