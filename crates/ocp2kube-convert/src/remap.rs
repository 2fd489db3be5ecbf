//! Enumerated-value remapping
//!
//! Source and target enumerations are unrelated types even where their
//! spellings overlap, so every crossing goes through an exhaustive match that
//! says how the value got there: an exact counterpart, a documented default,
//! a passthrough of a value nothing knows about, or an empty source.

use ocp2kube_core::openshift::{DeploymentStrategyType, TlsConfig, TlsTermination};

/// Outcome of mapping a source value onto a target enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remapped<T> {
    /// The source value has a direct counterpart
    Mapped(T),
    /// No direct counterpart; the documented default was applied
    Defaulted(T),
    /// Unknown source value, carried through verbatim
    Unmapped(String),
    /// The source did not set a value
    Unset,
}

impl<T: TargetValue> Remapped<T> {
    /// The string to write on the target, if any
    pub fn to_value(&self) -> Option<String> {
        match self {
            Self::Mapped(t) | Self::Defaulted(t) => Some(t.as_str().to_string()),
            Self::Unmapped(raw) => Some(raw.clone()),
            Self::Unset => None,
        }
    }
}

impl<T> Remapped<T> {
    /// The typed target value, ignoring passthroughs
    pub fn target(&self) -> Option<&T> {
        match self {
            Self::Mapped(t) | Self::Defaulted(t) => Some(t),
            Self::Unmapped(_) | Self::Unset => None,
        }
    }
}

/// A closed target enumeration with a canonical spelling
pub trait TargetValue: Copy + PartialEq {
    fn as_str(&self) -> &'static str;
}

/// Table-driven remap of a string-valued source enumeration
///
/// An empty source is `Unset`. A value missing from `table` takes `default`
/// when one is given and is passed through otherwise.
pub fn remap<T: TargetValue>(source: &str, table: &[(&str, T)], default: Option<T>) -> Remapped<T> {
    if source.is_empty() {
        return Remapped::Unset;
    }

    if let Some((_, target)) = table.iter().find(|(key, _)| *key == source) {
        return Remapped::Mapped(*target);
    }

    match default {
        Some(target) => Remapped::Defaulted(target),
        None => Remapped::Unmapped(source.to_string()),
    }
}

// =============================================================================
// DEPLOYMENT STRATEGY
// =============================================================================

/// Kubernetes Deployment strategy type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStrategyKind {
    RollingUpdate,
    Recreate,
}

impl TargetValue for DeploymentStrategyKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::RollingUpdate => "RollingUpdate",
            Self::Recreate => "Recreate",
        }
    }
}

/// `Rolling` and `Custom` both become `RollingUpdate`; `Recreate` is kept
pub fn deployment_strategy(source: &DeploymentStrategyType) -> Remapped<DeploymentStrategyKind> {
    match source {
        DeploymentStrategyType::Unset => Remapped::Unset,
        DeploymentStrategyType::Rolling | DeploymentStrategyType::Custom => {
            Remapped::Mapped(DeploymentStrategyKind::RollingUpdate)
        }
        DeploymentStrategyType::Recreate => Remapped::Mapped(DeploymentStrategyKind::Recreate),
        DeploymentStrategyType::Other(raw) => Remapped::Unmapped(raw.clone()),
    }
}

/// Whether rolling parameters may be copied for this strategy pair
///
/// Custom strategies carry no rolling parameters that mean anything to a
/// Deployment, so none are synthesized for them.
pub fn copies_rolling_params(
    source: &DeploymentStrategyType,
    target: &Remapped<DeploymentStrategyKind>,
) -> bool {
    target.target() == Some(&DeploymentStrategyKind::RollingUpdate)
        && !matches!(source, DeploymentStrategyType::Custom)
}

// =============================================================================
// TLS TERMINATION
// =============================================================================

/// What to emit for a Route's TLS block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsPlan {
    /// Forward TLS to the backend
    Passthrough,
    /// Terminate at the proxy using a Secret built from inline material
    Terminate { certificate: String, key: String },
    /// No TLS block on the target
    Omit(OmitReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmitReason {
    /// The source has no TLS block
    NoTls,
    /// Edge or re-encrypt termination without an inline certificate and key
    NoInlineMaterial(TlsTermination),
    /// A termination mode with no counterpart
    UnknownTermination(String),
}

pub fn tls_plan(tls: Option<&TlsConfig>) -> TlsPlan {
    let Some(tls) = tls else {
        return TlsPlan::Omit(OmitReason::NoTls);
    };

    match &tls.termination {
        TlsTermination::Passthrough => TlsPlan::Passthrough,
        TlsTermination::Edge | TlsTermination::Reencrypt => match tls.inline_material() {
            Some((certificate, key)) => TlsPlan::Terminate {
                certificate: certificate.to_string(),
                key: key.to_string(),
            },
            None => TlsPlan::Omit(OmitReason::NoInlineMaterial(tls.termination.clone())),
        },
        TlsTermination::Other(raw) => TlsPlan::Omit(OmitReason::UnknownTermination(raw.clone())),
    }
}

// =============================================================================
// POD SECURITY STRATEGIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAsUserRule {
    MustRunAs,
    MustRunAsNonRoot,
    RunAsAny,
}

impl TargetValue for RunAsUserRule {
    fn as_str(&self) -> &'static str {
        match self {
            Self::MustRunAs => "MustRunAs",
            Self::MustRunAsNonRoot => "MustRunAsNonRoot",
            Self::RunAsAny => "RunAsAny",
        }
    }
}

/// Run-as-user strategy
///
/// `MustRunAsRange` has no PodSecurityPolicy counterpart and relaxes to
/// `range_fallback` (`RunAsAny` unless the caller overrides it).
pub fn run_as_user_rule(source: &str, range_fallback: RunAsUserRule) -> Remapped<RunAsUserRule> {
    match source {
        "" => Remapped::Unset,
        "MustRunAs" => Remapped::Mapped(RunAsUserRule::MustRunAs),
        "MustRunAsNonRoot" => Remapped::Mapped(RunAsUserRule::MustRunAsNonRoot),
        "RunAsAny" => Remapped::Mapped(RunAsUserRule::RunAsAny),
        "MustRunAsRange" => Remapped::Defaulted(range_fallback),
        other => Remapped::Unmapped(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeLinuxRule {
    MustRunAs,
    RunAsAny,
}

impl TargetValue for SeLinuxRule {
    fn as_str(&self) -> &'static str {
        match self {
            Self::MustRunAs => "MustRunAs",
            Self::RunAsAny => "RunAsAny",
        }
    }
}

pub fn se_linux_rule(source: &str) -> Remapped<SeLinuxRule> {
    remap(
        source,
        &[("MustRunAs", SeLinuxRule::MustRunAs), ("RunAsAny", SeLinuxRule::RunAsAny)],
        None,
    )
}

/// Rule for `fsGroup` and `supplementalGroups`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRule {
    MustRunAs,
    MayRunAs,
    RunAsAny,
}

impl TargetValue for GroupRule {
    fn as_str(&self) -> &'static str {
        match self {
            Self::MustRunAs => "MustRunAs",
            Self::MayRunAs => "MayRunAs",
            Self::RunAsAny => "RunAsAny",
        }
    }
}

pub fn group_rule(source: &str) -> Remapped<GroupRule> {
    remap(
        source,
        &[
            ("MustRunAs", GroupRule::MustRunAs),
            ("MayRunAs", GroupRule::MayRunAs),
            ("RunAsAny", GroupRule::RunAsAny),
        ],
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_remap() {
        assert_eq!(
            deployment_strategy(&DeploymentStrategyType::Rolling),
            Remapped::Mapped(DeploymentStrategyKind::RollingUpdate)
        );
        assert_eq!(
            deployment_strategy(&DeploymentStrategyType::Custom),
            Remapped::Mapped(DeploymentStrategyKind::RollingUpdate)
        );
        assert_eq!(
            deployment_strategy(&DeploymentStrategyType::Recreate).to_value(),
            Some("Recreate".to_string())
        );
        assert_eq!(deployment_strategy(&DeploymentStrategyType::Unset), Remapped::Unset);
        assert_eq!(
            deployment_strategy(&DeploymentStrategyType::Other("BlueGreen".to_string())).to_value(),
            Some("BlueGreen".to_string())
        );
    }

    #[test]
    fn test_rolling_params_gate() {
        let rolling = DeploymentStrategyType::Rolling;
        let custom = DeploymentStrategyType::Custom;
        let recreate = DeploymentStrategyType::Recreate;

        assert!(copies_rolling_params(&rolling, &deployment_strategy(&rolling)));
        assert!(!copies_rolling_params(&custom, &deployment_strategy(&custom)));
        assert!(!copies_rolling_params(&recreate, &deployment_strategy(&recreate)));
    }

    #[test]
    fn test_run_as_user_range_relaxes() {
        assert_eq!(
            run_as_user_rule("MustRunAsRange", RunAsUserRule::RunAsAny),
            Remapped::Defaulted(RunAsUserRule::RunAsAny)
        );
        assert_eq!(
            run_as_user_rule("MustRunAsRange", RunAsUserRule::MustRunAsNonRoot).to_value(),
            Some("MustRunAsNonRoot".to_string())
        );
        assert_eq!(
            run_as_user_rule("MustRunAsNonRoot", RunAsUserRule::RunAsAny),
            Remapped::Mapped(RunAsUserRule::MustRunAsNonRoot)
        );
        assert_eq!(run_as_user_rule("", RunAsUserRule::RunAsAny).to_value(), None);
    }

    #[test]
    fn test_table_remap_passthrough_and_default() {
        assert_eq!(se_linux_rule("MustRunAs"), Remapped::Mapped(SeLinuxRule::MustRunAs));
        assert_eq!(se_linux_rule("Custom"), Remapped::Unmapped("Custom".to_string()));
        assert_eq!(group_rule(""), Remapped::Unset);

        let table = [("A", GroupRule::MustRunAs)];
        assert_eq!(remap("B", &table, Some(GroupRule::RunAsAny)), Remapped::Defaulted(GroupRule::RunAsAny));
    }

    #[test]
    fn test_tls_plan() {
        assert_eq!(tls_plan(None), TlsPlan::Omit(OmitReason::NoTls));

        let passthrough = TlsConfig::new(TlsTermination::Passthrough);
        assert_eq!(tls_plan(Some(&passthrough)), TlsPlan::Passthrough);

        let mut edge = TlsConfig::new(TlsTermination::Edge);
        assert_eq!(
            tls_plan(Some(&edge)),
            TlsPlan::Omit(OmitReason::NoInlineMaterial(TlsTermination::Edge))
        );

        edge.certificate = Some("CERT".to_string());
        edge.key = Some("KEY".to_string());
        assert_eq!(
            tls_plan(Some(&edge)),
            TlsPlan::Terminate {
                certificate: "CERT".to_string(),
                key: "KEY".to_string()
            }
        );

        let other = TlsConfig::new(TlsTermination::Other("mtls".to_string()));
        assert_eq!(
            tls_plan(Some(&other)),
            TlsPlan::Omit(OmitReason::UnknownTermination("mtls".to_string()))
        );
    }
}
