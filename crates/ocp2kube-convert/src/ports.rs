//! Cross-resource port resolution
//!
//! A Route names its backend port either by number or by name. The number is
//! compared with each Service port's target port, the name with each Service
//! port's name. The Service's own `port` is what the proxy talks to.

use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use ocp2kube_core::openshift::RoutePort;

use crate::error::PortResolutionError;

/// Resolve the Service port a Route should send traffic to
///
/// Without a reference the first Service port is used. Candidates are tried
/// in Service order and the first match wins. A resolved value of `0` is
/// never returned.
pub fn resolve_port(
    reference: Option<&RoutePort>,
    ports: &[ServicePort],
) -> Result<i32, PortResolutionError> {
    let resolved = match reference {
        None => ports.first().map(|p| p.port),
        Some(reference) => ports
            .iter()
            .find(|candidate| matches_reference(&reference.target_port, candidate))
            .map(|p| p.port),
    };

    match resolved {
        Some(port) if port != 0 => {
            tracing::debug!("resolved backend port {}", port);
            Ok(port)
        }
        _ => Err(PortResolutionError {
            requested: reference
                .map(|r| describe(&r.target_port))
                .unwrap_or_else(|| "<first>".to_string()),
            candidates: ports.iter().map(describe_candidate).collect(),
        }),
    }
}

fn matches_reference(reference: &IntOrString, candidate: &ServicePort) -> bool {
    match reference {
        IntOrString::Int(number) => effective_target(candidate) == IntOrString::Int(*number),
        IntOrString::String(name) => candidate.name.as_deref() == Some(name.as_str()),
    }
}

/// A port without `targetPort` forwards to the same number
fn effective_target(port: &ServicePort) -> IntOrString {
    port.target_port
        .clone()
        .unwrap_or(IntOrString::Int(port.port))
}

fn describe(value: &IntOrString) -> String {
    match value {
        IntOrString::Int(n) => n.to_string(),
        IntOrString::String(s) => s.clone(),
    }
}

fn describe_candidate(port: &ServicePort) -> String {
    format!(
        "{}:{}->{}",
        port.name.as_deref().unwrap_or(""),
        port.port,
        describe(&effective_target(port))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(name: &str, port: i32, target: i32) -> ServicePort {
        ServicePort {
            name: Some(name.to_string()),
            port,
            target_port: Some(IntOrString::Int(target)),
            ..Default::default()
        }
    }

    fn ports() -> Vec<ServicePort> {
        vec![
            port("http", 8080, 80),
            port("https", 8443, 443),
            port("metrics", 9090, 9090),
        ]
    }

    fn by_name(name: &str) -> RoutePort {
        RoutePort {
            target_port: IntOrString::String(name.to_string()),
        }
    }

    fn by_number(n: i32) -> RoutePort {
        RoutePort {
            target_port: IntOrString::Int(n),
        }
    }

    #[test]
    fn test_no_reference_takes_first_port() {
        assert_eq!(resolve_port(None, &ports()), Ok(8080));
    }

    #[test]
    fn test_named_reference() {
        assert_eq!(resolve_port(Some(&by_name("http")), &ports()), Ok(8080));
        assert_eq!(resolve_port(Some(&by_name("metrics")), &ports()), Ok(9090));
    }

    #[test]
    fn test_numeric_reference_matches_target_port() {
        assert_eq!(resolve_port(Some(&by_number(80)), &ports()), Ok(8080));
        assert_eq!(resolve_port(Some(&by_number(443)), &ports()), Ok(8443));
        // 8080 is a service port, not a target port
        assert!(resolve_port(Some(&by_number(8080)), &ports()).is_err());
    }

    #[test]
    fn test_missing_target_port_defaults_to_port() {
        let ports = vec![ServicePort {
            name: None,
            port: 3000,
            ..Default::default()
        }];
        assert_eq!(resolve_port(Some(&by_number(3000)), &ports), Ok(3000));
    }

    #[test]
    fn test_unmatched_reference_lists_candidates() {
        let err = resolve_port(Some(&by_name("grpc")), &ports()).unwrap_err();
        assert_eq!(err.requested, "grpc");
        assert_eq!(
            err.candidates,
            vec!["http:8080->80", "https:8443->443", "metrics:9090->9090"]
        );
    }

    #[test]
    fn test_first_match_wins() {
        let ports = vec![port("a", 8000, 80), port("b", 9000, 80)];
        assert_eq!(resolve_port(Some(&by_number(80)), &ports), Ok(8000));
    }

    #[test]
    fn test_zero_is_never_resolved() {
        let ports = vec![port("zero", 0, 80)];
        assert!(resolve_port(Some(&by_number(80)), &ports).is_err());
        assert!(resolve_port(None, &[]).is_err());
    }
}
