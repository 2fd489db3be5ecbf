//! Subject classification for policy bindings
//!
//! Identity strings on a security policy are either users, service accounts
//! written as `system:serviceaccount:<namespace>:<name>`, or groups. Identities
//! matching the exclusion pattern belong to the platform itself and are not
//! carried over.

use k8s_openapi::api::rbac::v1 as rbac;
use regex::Regex;

use crate::diagnostics::DiagnosticSink;
use crate::error::{ConversionWarning, ConvertError, Result};

/// API group carried by `User` and `Group` subjects
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

pub const DEFAULT_EXCLUSION_PATTERN: &str = "openshift|velero|management-infra";
pub const DEFAULT_SERVICE_ACCOUNT_PATTERN: &str = "system:serviceaccount";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    ServiceAccount { name: String, namespace: String },
    User { name: String },
    Group { name: String },
}

impl Subject {
    pub fn to_rbac(&self) -> rbac::Subject {
        match self {
            Self::ServiceAccount { name, namespace } => rbac::Subject {
                api_group: None,
                kind: "ServiceAccount".to_string(),
                name: name.clone(),
                namespace: Some(namespace.clone()),
            },
            Self::User { name } => rbac::Subject {
                api_group: Some(RBAC_API_GROUP.to_string()),
                kind: "User".to_string(),
                name: name.clone(),
                namespace: None,
            },
            Self::Group { name } => rbac::Subject {
                api_group: Some(RBAC_API_GROUP.to_string()),
                kind: "Group".to_string(),
                name: name.clone(),
                namespace: None,
            },
        }
    }
}

/// Patterns driving classification
///
/// Both patterns are unanchored searches.
#[derive(Debug, Clone)]
pub struct SubjectRules {
    exclusion: Regex,
    service_account: Regex,
}

impl SubjectRules {
    pub fn new(exclusion: &str, service_account: &str) -> Result<Self> {
        Ok(Self {
            exclusion: compile(exclusion)?,
            service_account: compile(service_account)?,
        })
    }

    pub fn exclusion_pattern(&self) -> &str {
        self.exclusion.as_str()
    }

    pub fn service_account_pattern(&self) -> &str {
        self.service_account.as_str()
    }

    pub fn is_excluded(&self, identity: &str) -> bool {
        self.exclusion.is_match(identity)
    }

    /// Classify user identities, preserving input order
    pub fn classify_users(
        &self,
        policy: &str,
        identities: &[String],
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Subject> {
        identities
            .iter()
            .filter(|identity| !self.is_excluded(identity))
            .map(|identity| {
                if self.service_account.is_match(identity) {
                    service_account(policy, identity, sink)
                } else {
                    Subject::User {
                        name: identity.clone(),
                    }
                }
            })
            .collect()
    }

    /// Classify group identities; groups are never service accounts
    pub fn classify_groups(&self, identities: &[String]) -> Vec<Subject> {
        identities
            .iter()
            .filter(|identity| !self.is_excluded(identity))
            .map(|identity| Subject::Group {
                name: identity.clone(),
            })
            .collect()
    }
}

impl Default for SubjectRules {
    fn default() -> Self {
        Self {
            exclusion: Regex::new(DEFAULT_EXCLUSION_PATTERN).expect("default exclusion pattern is valid"),
            service_account: Regex::new(DEFAULT_SERVICE_ACCOUNT_PATTERN)
                .expect("default service account pattern is valid"),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConvertError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// The last two `:` segments are `(namespace, name)`
///
/// Identities with fewer than four segments, or with an empty namespace or
/// name, are kept as users.
fn service_account(policy: &str, identity: &str, sink: &mut dyn DiagnosticSink) -> Subject {
    let segments: Vec<&str> = identity.split(':').collect();

    if segments.len() >= 4 {
        let namespace = segments[segments.len() - 2];
        let name = segments[segments.len() - 1];
        if !namespace.is_empty() && !name.is_empty() {
            return Subject::ServiceAccount {
                name: name.to_string(),
                namespace: namespace.to_string(),
            };
        }
    }

    tracing::warn!("malformed service account identity '{}'", identity);
    sink.emit(
        ConversionWarning::warning(
            "SecurityContextConstraints",
            policy,
            "Users",
            &format!("'{}' is not of the form system:serviceaccount:<namespace>:<name>", identity),
        )
        .with_suggestion("bound as a User subject"),
    );
    Subject::User {
        name: identity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, NullSink};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_service_account_identity() {
        let subjects = SubjectRules::default().classify_users(
            "restricted",
            &ids(&["system:serviceaccount:default:default"]),
            &mut NullSink,
        );
        assert_eq!(
            subjects,
            vec![Subject::ServiceAccount {
                name: "default".to_string(),
                namespace: "default".to_string()
            }]
        );
    }

    #[test]
    fn test_excluded_identity_is_dropped() {
        let subjects = SubjectRules::default().classify_users(
            "restricted",
            &ids(&["system:serviceaccount:openshift:admin", "velero-sa"]),
            &mut NullSink,
        );
        assert!(subjects.is_empty());
    }

    #[test]
    fn test_plain_user() {
        let subjects =
            SubjectRules::default().classify_users("restricted", &ids(&["someuser"]), &mut NullSink);
        assert_eq!(
            subjects,
            vec![Subject::User {
                name: "someuser".to_string()
            }]
        );
        let rbac = subjects[0].to_rbac();
        assert_eq!(rbac.kind, "User");
        assert_eq!(rbac.api_group.as_deref(), Some(RBAC_API_GROUP));
    }

    #[test]
    fn test_order_is_preserved_without_dedup() {
        let subjects = SubjectRules::default().classify_users(
            "restricted",
            &ids(&["bob", "system:serviceaccount:web:builder", "bob"]),
            &mut NullSink,
        );
        assert_eq!(subjects.len(), 3);
        assert!(matches!(&subjects[0], Subject::User { name } if name == "bob"));
        assert!(matches!(&subjects[1], Subject::ServiceAccount { namespace, .. } if namespace == "web"));
        assert_eq!(subjects[0], subjects[2]);
    }

    #[test]
    fn test_short_service_account_becomes_user() {
        let mut sink = CollectingSink::new();
        let subjects = SubjectRules::default().classify_users(
            "restricted",
            &ids(&["system:serviceaccount:lonely", "system:serviceaccount::name"]),
            &mut sink,
        );
        assert_eq!(
            subjects,
            vec![
                Subject::User {
                    name: "system:serviceaccount:lonely".to_string()
                },
                Subject::User {
                    name: "system:serviceaccount::name".to_string()
                },
            ]
        );
        assert_eq!(sink.warnings.len(), 2);
    }

    #[test]
    fn test_groups_skip_service_account_detection() {
        let subjects = SubjectRules::default().classify_groups(&ids(&[
            "system:serviceaccounts:ci",
            "system:cluster-admins",
            "openshift-infra",
        ]));
        assert_eq!(subjects.len(), 2);
        assert!(subjects.iter().all(|s| matches!(s, Subject::Group { .. })));
        assert_eq!(subjects[1].to_rbac().kind, "Group");
    }

    #[test]
    fn test_custom_rules() {
        let rules = SubjectRules::new("^kube-", "^sa:").unwrap();
        let subjects = rules.classify_users(
            "p",
            &ids(&["kube-proxy", "sa:x:ns:app", "openshift-user"]),
            &mut NullSink,
        );
        assert_eq!(subjects.len(), 2);
        assert_eq!(
            subjects[0],
            Subject::ServiceAccount {
                name: "app".to_string(),
                namespace: "ns".to_string()
            }
        );
        assert!(SubjectRules::new("(", "x").is_err());
    }

    #[test]
    fn test_service_account_to_rbac() {
        let subject = Subject::ServiceAccount {
            name: "builder".to_string(),
            namespace: "ci".to_string(),
        };
        let rbac = subject.to_rbac();
        assert_eq!(rbac.kind, "ServiceAccount");
        assert_eq!(rbac.namespace.as_deref(), Some("ci"));
        assert_eq!(rbac.api_group, None);
    }
}
