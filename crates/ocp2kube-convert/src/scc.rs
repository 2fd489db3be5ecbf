//! SecurityContextConstraints → PodSecurityPolicy and RBAC translation
//!
//! Each SCC yields a cluster-scoped PodSecurityPolicy, a ClusterRole allowed
//! to `use` it, and a ClusterRoleBinding granting that role to the SCC's
//! users and groups. The binding is absent when no subject survives
//! classification.

use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use ocp2kube_core::openshift::SecurityContextConstraints;
use ocp2kube_core::policy::{
    AllowedFlexVolume, GroupStrategyOptions, IdRange, PodSecurityPolicy, PodSecurityPolicySpec,
    RunAsUserStrategyOptions, SeLinuxStrategyOptions,
};

use crate::annotations::{self, FieldFact, FieldFacts};
use crate::config::{RbacNaming, TranslatorConfig};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ConversionWarning, Result, ValidationError};
use crate::remap::{self, Remapped, RunAsUserRule, TargetValue};
use crate::subjects::{RBAC_API_GROUP, Subject, SubjectRules};

const SCC_KIND: &str = "SecurityContextConstraints";

/// API group serving `podsecuritypolicies`
pub const PSP_API_GROUP: &str = "policy";

/// SecurityContextConstraints fields a PodSecurityPolicy cannot express
pub fn scc_facts() -> FieldFacts<SecurityContextConstraints> {
    FieldFacts::new(SCC_KIND)
        .fact(FieldFact::new("Priority", |s: &SecurityContextConstraints| s.priority.is_some()))
        .fact(FieldFact::new("RunAsUser.UID", |s: &SecurityContextConstraints| {
            s.run_as_user.uid.is_some()
        }))
        .fact(FieldFact::new("SeccompProfiles", |s: &SecurityContextConstraints| {
            s.seccomp_profiles.is_some()
        }))
        .fact(FieldFact::new("AllowHostDirVolumePlugin", |s: &SecurityContextConstraints| {
            s.allow_host_dir_volume_plugin
        }))
        .fact(FieldFact::new("AllowHostPorts", |s: &SecurityContextConstraints| {
            s.allow_host_ports
        }))
}

/// Resources produced from one SCC
#[derive(Debug, Clone, PartialEq)]
pub struct SccOutput {
    pub policy: PodSecurityPolicy,
    pub cluster_role: ClusterRole,
    pub binding: Option<ClusterRoleBinding>,
}

#[derive(Debug, Clone)]
pub struct SccTranslator {
    config: TranslatorConfig,
    facts: FieldFacts<SecurityContextConstraints>,
    rules: SubjectRules,
    naming: RbacNaming,
    range_fallback: RunAsUserRule,
}

impl SccTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            facts: scc_facts(),
            rules: SubjectRules::default(),
            naming: RbacNaming::default(),
            range_fallback: RunAsUserRule::RunAsAny,
        }
    }

    pub fn with_facts(mut self, facts: FieldFacts<SecurityContextConstraints>) -> Self {
        self.facts = facts;
        self
    }

    pub fn with_subject_rules(mut self, rules: SubjectRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_rbac_naming(mut self, naming: RbacNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Rule applied in place of `MustRunAsRange`
    pub fn with_range_fallback(mut self, rule: RunAsUserRule) -> Self {
        self.range_fallback = rule;
        self
    }

    pub fn translate(
        &self,
        scc: &SecurityContextConstraints,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<SccOutput> {
        let name = scc.name();
        if name.is_empty() {
            return Err(ValidationError::MissingField {
                kind: SCC_KIND.to_string(),
                field: "metadata.name".to_string(),
            }
            .into());
        }
        tracing::debug!("[{}] translating SecurityContextConstraints {}", self.config.caller_name, name);

        let recorded = annotations::record(&self.config.caller_name, name, &self.facts, scc, sink);
        let metadata = ObjectMeta {
            name: Some(name.to_string()),
            labels: scc.metadata.labels.clone(),
            annotations: annotations::merge_into_meta(scc.metadata.annotations.clone(), recorded),
            ..Default::default()
        };

        let policy = PodSecurityPolicy::new(metadata, self.policy_spec(scc, sink));
        let cluster_role = self.cluster_role(name);
        let binding = self.binding(scc, sink);

        Ok(SccOutput {
            policy,
            cluster_role,
            binding,
        })
    }

    fn policy_spec(&self, scc: &SecurityContextConstraints, sink: &mut dyn DiagnosticSink) -> PodSecurityPolicySpec {
        let name = scc.name();

        let run_as_user = remap::run_as_user_rule(&scc.run_as_user.type_, self.range_fallback);
        if let Remapped::Defaulted(rule) = &run_as_user {
            tracing::debug!("[{}] MustRunAsRange relaxed to {}", self.config.caller_name, rule.as_str());
            sink.emit(ConversionWarning::info(
                SCC_KIND,
                name,
                "RunAsUser.Type",
                &format!("MustRunAsRange mapped to {}", rule.as_str()),
            ));
        }

        PodSecurityPolicySpec {
            privileged: scc.allow_privileged_container,
            default_add_capabilities: scc.default_add_capabilities.clone(),
            required_drop_capabilities: scc.required_drop_capabilities.clone(),
            allowed_capabilities: scc.allowed_capabilities.clone(),
            volumes: scc.volumes.clone(),
            allowed_flex_volumes: scc.allowed_flex_volumes.as_ref().map(|volumes| {
                volumes
                    .iter()
                    .map(|v| AllowedFlexVolume {
                        driver: v.driver.clone(),
                    })
                    .collect()
            }),
            host_network: scc.allow_host_network,
            host_pid: scc.allow_host_pid,
            host_ipc: scc.allow_host_ipc,
            default_allow_privilege_escalation: scc.default_allow_privilege_escalation,
            allow_privilege_escalation: scc.allow_privilege_escalation,
            se_linux: SeLinuxStrategyOptions {
                rule: self.rule_value(name, "SELinuxContext.Type", remap::se_linux_rule(&scc.se_linux_context.type_), sink),
                se_linux_options: scc.se_linux_context.se_linux_options.clone(),
            },
            run_as_user: RunAsUserStrategyOptions {
                rule: self.rule_value(name, "RunAsUser.Type", run_as_user, sink),
                ranges: scc.run_as_user.uid_range().map(|range| vec![range]),
            },
            supplemental_groups: GroupStrategyOptions {
                rule: self.rule_value(
                    name,
                    "SupplementalGroups.Type",
                    remap::group_rule(&scc.supplemental_groups.type_),
                    sink,
                ),
                ranges: copy_ranges(scc.supplemental_groups.ranges.as_deref()),
            },
            fs_group: GroupStrategyOptions {
                rule: self.rule_value(name, "FSGroup.Type", remap::group_rule(&scc.fs_group.type_), sink),
                ranges: copy_ranges(scc.fs_group.ranges.as_deref()),
            },
            read_only_root_filesystem: scc.read_only_root_filesystem,
            allowed_unsafe_sysctls: scc.allowed_unsafe_sysctls.clone(),
            forbidden_sysctls: scc.forbidden_sysctls.clone(),
        }
    }

    /// Rule string to write; unknown values are copied and reported
    fn rule_value<T: TargetValue>(
        &self,
        name: &str,
        field: &str,
        remapped: Remapped<T>,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        if let Remapped::Unmapped(raw) = &remapped {
            tracing::warn!("[{}] unknown strategy {} copied as is", self.config.caller_name, raw);
            sink.emit(ConversionWarning::warning(
                SCC_KIND,
                name,
                field,
                &format!("unknown strategy '{}' copied as is", raw),
            ));
        }
        remapped.to_value().unwrap_or_default()
    }

    fn cluster_role(&self, name: &str) -> ClusterRole {
        let rule = PolicyRule {
            verbs: vec!["use".to_string()],
            api_groups: Some(vec![PSP_API_GROUP.to_string()]),
            resources: Some(vec!["podsecuritypolicies".to_string()]),
            resource_names: Some(vec![name.to_string()]),
            ..Default::default()
        };

        ClusterRole {
            metadata: ObjectMeta {
                name: Some(self.naming.role_name(name)),
                ..Default::default()
            },
            rules: Some(vec![rule]),
            ..Default::default()
        }
    }

    fn binding(&self, scc: &SecurityContextConstraints, sink: &mut dyn DiagnosticSink) -> Option<ClusterRoleBinding> {
        let mut subjects: Vec<Subject> = self.rules.classify_users(scc.name(), &scc.users, sink);
        subjects.extend(self.rules.classify_groups(&scc.groups));

        if subjects.is_empty() {
            tracing::debug!(
                "[{}] no subjects for {}; ClusterRoleBinding not created",
                self.config.caller_name,
                scc.name()
            );
            return None;
        }

        let role_name = self.naming.role_name(scc.name());
        Some(ClusterRoleBinding {
            metadata: ObjectMeta {
                name: Some(role_name.clone()),
                ..Default::default()
            },
            role_ref: RoleRef {
                api_group: RBAC_API_GROUP.to_string(),
                kind: "ClusterRole".to_string(),
                name: role_name,
            },
            subjects: Some(subjects.iter().map(Subject::to_rbac).collect()),
        })
    }
}

impl Default for SccTranslator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

fn copy_ranges(ranges: Option<&[IdRange]>) -> Option<Vec<IdRange>> {
    ranges.map(<[IdRange]>::to_vec)
}
