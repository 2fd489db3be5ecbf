//! DeploymentConfig command

use std::path::Path;

use ocp2kube_convert::{CollectingSink, DeploymentConfigTranslator};
use ocp2kube_core::DeploymentConfig;

use super::{Context, Document, load};
use crate::error::Result;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let dc: DeploymentConfig = load(path)?;

    let mut sink = CollectingSink::new();
    let deployment = DeploymentConfigTranslator::new(ctx.config.clone()).translate(&dc, &mut sink)?;

    let name = deployment.metadata.name.as_deref().unwrap_or_default();
    ctx.finish(&[Document::render(name, &deployment)?], sink)
}
