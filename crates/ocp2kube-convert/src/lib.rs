//! ocp2kube Convert - OpenShift to Kubernetes resource translators
//!
//! This crate turns OpenShift-specific resources into their closest upstream
//! Kubernetes, Contour and RBAC equivalents:
//!
//! | OpenShift                    | Produces                                            |
//! |------------------------------|-----------------------------------------------------|
//! | `Route` + `Service`          | `HTTPProxy`, plus a TLS `Secret` for inline certs   |
//! | `SecurityContextConstraints` | `PodSecurityPolicy`, `ClusterRole`, `ClusterRoleBinding` |
//! | `DeploymentConfig`           | `Deployment`                                        |
//! | `Ingress`                    | `HTTPProxy`                                         |
//!
//! Translation is best effort. Every source field the target cannot express
//! is flagged with a `<caller>/<Kind>.<field>: unsupported` annotation on the
//! output and reported to a [`DiagnosticSink`]. Sinks only observe: the output
//! is the same whichever sink is attached.
//!
//! # Example
//!
//! ```no_run
//! use ocp2kube_convert::{CollectingSink, RouteTranslator, TranslatorConfig};
//! # fn load() -> (ocp2kube_core::Route, ocp2kube_core::k8s_openapi::api::core::v1::Service) { unimplemented!() }
//!
//! let (route, service) = load();
//! let translator = RouteTranslator::new(
//!     TranslatorConfig::new("migration").with_domain("*.apps.k8s.example.com"),
//! );
//!
//! let mut sink = CollectingSink::new();
//! let output = translator.translate(&route, &service, &mut sink).unwrap();
//!
//! for warning in &sink.warnings {
//!     println!("{}", warning);
//! }
//! # let _ = output;
//! ```
//!
//! Errors abort a translation with no partial output: a Route and Service
//! that do not belong together, or a port reference that matches no Service
//! port, return an error and nothing else.

pub mod annotations;
pub mod config;
pub mod deployment;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod ingress;
pub mod ports;
pub mod remap;
pub mod route;
pub mod scc;
pub mod secret;
pub mod subjects;

// Re-exports
pub use annotations::{FieldFact, FieldFacts};
pub use config::{RbacNaming, SecretNaming, Settings, TranslatorConfig};
pub use deployment::{DeploymentConfigTranslator, deployment_config_facts};
pub use diagnostics::{CollectingSink, DiagnosticSink, NullSink, TracingSink};
pub use error::{ConversionWarning, ConvertError, PortResolutionError, Result, ValidationError, WarningSeverity};
pub use ingress::IngressTranslator;
pub use ports::resolve_port;
pub use remap::{Remapped, RunAsUserRule};
pub use route::{RouteOutput, RouteTranslator, route_facts};
pub use scc::{SccOutput, SccTranslator, scc_facts};
pub use subjects::{Subject, SubjectRules};
