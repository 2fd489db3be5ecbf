//! DeploymentConfig → Deployment translation

use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentCondition, DeploymentSpec, DeploymentStatus, DeploymentStrategy,
    RollingUpdateDeployment,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use ocp2kube_core::openshift::{DeploymentConfig, DeploymentConfigStatus};

use crate::annotations::{self, FieldFact, FieldFacts};
use crate::config::TranslatorConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::{ConversionWarning, Result, ValidationError};
use crate::remap::{self, Remapped};

const DC_KIND: &str = "DeploymentConfig";

/// DeploymentConfig fields a Deployment never carries
///
/// `rollingParams.updatePeriodSeconds` yields a key past the 63 character
/// bound; it is reported to the sink but never annotated.
pub fn deployment_config_facts() -> FieldFacts<DeploymentConfig> {
    FieldFacts::new(DC_KIND)
        .fact(FieldFact::always("Spec.test"))
        .fact(FieldFact::always("Spec.trigger"))
        .fact(FieldFact::always("Spec.Strategy.activeDeadlineSeconds"))
        .fact(FieldFact::always("Spec.Strategy.rollingParams.intervalSeconds"))
        .fact(FieldFact::always("Spec.Strategy.rollingParams.timeoutSeconds"))
        .fact(FieldFact::always("Spec.Strategy.rollingParams.updatePeriodSeconds"))
}

#[derive(Debug, Clone)]
pub struct DeploymentConfigTranslator {
    config: TranslatorConfig,
    facts: FieldFacts<DeploymentConfig>,
}

impl DeploymentConfigTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            facts: deployment_config_facts(),
        }
    }

    pub fn with_facts(mut self, facts: FieldFacts<DeploymentConfig>) -> Self {
        self.facts = facts;
        self
    }

    pub fn translate(&self, dc: &DeploymentConfig, sink: &mut dyn DiagnosticSink) -> Result<Deployment> {
        let name = dc.metadata.name.as_deref().unwrap_or_default();
        if name.is_empty() {
            return Err(missing("metadata.name"));
        }
        let Some(template) = dc.spec.template.clone() else {
            return Err(missing("spec.template"));
        };
        tracing::debug!("[{}] translating DeploymentConfig {}", self.config.caller_name, name);

        let recorded = annotations::record(&self.config.caller_name, name, &self.facts, dc, sink);
        let metadata = ObjectMeta {
            name: dc.metadata.name.clone(),
            namespace: dc.metadata.namespace.clone(),
            labels: dc.metadata.labels.clone(),
            annotations: annotations::merge_into_meta(dc.metadata.annotations.clone(), recorded),
            ..Default::default()
        };

        let spec = DeploymentSpec {
            replicas: Some(dc.spec.replicas),
            revision_history_limit: dc.spec.revision_history_limit,
            paused: dc.spec.paused.then_some(true),
            min_ready_seconds: dc.spec.min_ready_seconds,
            selector: LabelSelector {
                match_labels: dc.spec.selector.clone(),
                ..Default::default()
            },
            strategy: self.strategy(dc, name, sink),
            template,
            ..Default::default()
        };

        Ok(Deployment {
            metadata,
            spec: Some(spec),
            status: status(&dc.status),
        })
    }

    fn strategy(&self, dc: &DeploymentConfig, name: &str, sink: &mut dyn DiagnosticSink) -> Option<DeploymentStrategy> {
        let source = &dc.spec.strategy;
        let target = remap::deployment_strategy(&source.type_);
        tracing::debug!("[{}] strategy {} -> {:?}", self.config.caller_name, source.type_.as_str(), target);

        if let Remapped::Unmapped(raw) = &target {
            sink.emit(ConversionWarning::warning(
                DC_KIND,
                name,
                "Spec.Strategy.Type",
                &format!("unknown strategy '{}' copied as is", raw),
            ));
        }

        let rolling_update = if remap::copies_rolling_params(&source.type_, &target) {
            source.rolling_params.as_ref().map(|params| RollingUpdateDeployment {
                max_surge: params.max_surge.clone(),
                max_unavailable: params.max_unavailable.clone(),
            })
        } else {
            None
        };

        target.to_value().map(|type_| DeploymentStrategy {
            type_: Some(type_),
            rolling_update,
        })
    }
}

impl Default for DeploymentConfigTranslator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

fn missing(field: &str) -> crate::error::ConvertError {
    ValidationError::MissingField {
        kind: DC_KIND.to_string(),
        field: field.to_string(),
    }
    .into()
}

/// Copied only when the DeploymentConfig reports a status
fn status(source: &DeploymentConfigStatus) -> Option<DeploymentStatus> {
    if *source == DeploymentConfigStatus::default() {
        return None;
    }

    let conditions = source
        .conditions
        .iter()
        .map(|c| DeploymentCondition {
            type_: c.type_.clone(),
            status: c.status.clone(),
            last_update_time: c.last_update_time.clone(),
            last_transition_time: c.last_transition_time.clone(),
            reason: c.reason.clone(),
            message: c.message.clone(),
        })
        .collect::<Vec<_>>();

    Some(DeploymentStatus {
        available_replicas: Some(source.available_replicas),
        observed_generation: Some(source.observed_generation),
        ready_replicas: Some(source.ready_replicas),
        replicas: Some(source.replicas),
        unavailable_replicas: Some(source.unavailable_replicas),
        updated_replicas: Some(source.updated_replicas),
        conditions: if conditions.is_empty() { None } else { Some(conditions) },
        ..Default::default()
    })
}
