//! Ingress command

use std::path::Path;

use ocp2kube_convert::{CollectingSink, IngressTranslator};
use ocp2kube_core::k8s_openapi::api::networking::v1::Ingress;

use super::{Context, Document, load};
use crate::error::Result;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let ingress: Ingress = load(path)?;

    let mut sink = CollectingSink::new();
    let proxy = IngressTranslator::new(ctx.config.clone()).translate(&ingress, &mut sink)?;

    let name = proxy.metadata.name.as_deref().unwrap_or_default();
    ctx.finish(&[Document::render(name, &proxy)?], sink)
}
