//! Route command - Route and Service to HTTPProxy, plus the TLS Secret

use std::path::Path;

use ocp2kube_convert::{CollectingSink, RouteTranslator};
use ocp2kube_core::Route;
use ocp2kube_core::k8s_openapi::api::core::v1::Service;

use super::{Context, Document, load};
use crate::error::Result;

pub fn run(ctx: &Context, route_path: &Path, service_path: &Path) -> Result<()> {
    let route: Route = load(route_path)?;
    let service: Service = load(service_path)?;

    let translator = RouteTranslator::new(ctx.config.clone()).with_secret_naming(ctx.settings.secret_naming());
    let mut sink = CollectingSink::new();
    let output = translator.translate(&route, &service, &mut sink)?;

    let mut documents = vec![Document::render(route.name(), &output.proxy)?];
    if let Some(secret) = &output.secret {
        let name = secret.metadata.name.as_deref().unwrap_or_default();
        documents.push(Document::render(name, secret)?);
    }

    ctx.finish(&documents, sink)
}
