//! SCC command - SecurityContextConstraints to PodSecurityPolicy and RBAC

use std::path::Path;

use ocp2kube_convert::{CollectingSink, SccTranslator};
use ocp2kube_core::SecurityContextConstraints;

use super::{Context, Document, load};
use crate::error::Result;

pub fn run(ctx: &Context, scc_path: &Path) -> Result<()> {
    let scc: SecurityContextConstraints = load(scc_path)?;

    let translator = SccTranslator::new(ctx.config.clone())
        .with_subject_rules(ctx.settings.subject_rules()?)
        .with_rbac_naming(ctx.settings.rbac_naming());
    let mut sink = CollectingSink::new();
    let output = translator.translate(&scc, &mut sink)?;

    let role_name = output.cluster_role.metadata.name.as_deref().unwrap_or_default();
    let mut documents = vec![
        Document::render(scc.name(), &output.policy)?,
        Document::render(role_name, &output.cluster_role)?,
    ];
    if let Some(binding) = &output.binding {
        let name = binding.metadata.name.as_deref().unwrap_or_default();
        documents.push(Document::render(name, binding)?);
    }

    ctx.finish(&documents, sink)
}
