//! CLI command implementations

pub mod dc;
pub mod ingress;
pub mod route;
pub mod scc;

use std::path::{Path, PathBuf};

use ocp2kube_convert::{CollectingSink, ConversionWarning, Settings, TranslatorConfig};
use ocp2kube_core::k8s_openapi::Resource;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::GlobalArgs;
use crate::display;
use crate::error::{CliError, Result};

/// Resolved settings for one invocation
///
/// Command-line flags take precedence over the settings file.
pub struct Context {
    pub settings: Settings,
    pub config: TranslatorConfig,
    pub output_dir: Option<PathBuf>,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };

        if let Some(name) = &args.name {
            settings.caller_name = Some(name.clone());
        }
        if let Some(domain) = &args.domain {
            settings.domain = Some(domain.clone());
        }

        let config = settings.translator_config();
        tracing::debug!("caller name {}, domain {:?}", config.caller_name, config.domain);

        Ok(Self {
            settings,
            config,
            output_dir: args.output_dir.clone(),
        })
    }

    /// Write the translated documents and summarize the warnings
    pub fn finish(&self, documents: &[Document], sink: CollectingSink) -> Result<()> {
        match &self.output_dir {
            Some(dir) => write_files(dir, documents)?,
            None => print!("{}", join_documents(documents)),
        }

        let warnings: Vec<ConversionWarning> = sink.into_warnings();
        display::print_summary(&warnings);
        Ok(())
    }
}

/// One rendered output resource
pub struct Document {
    pub kind: String,
    pub name: String,
    pub yaml: String,
}

impl Document {
    pub fn render<T>(name: &str, resource: &T) -> Result<Self>
    where
        T: Resource + Serialize,
    {
        Ok(Self {
            kind: T::KIND.to_string(),
            name: name.to_string(),
            yaml: ocp2kube_core::to_yaml(resource).map_err(CliError::output)?,
        })
    }

    /// `<kind-lowercase>-<name>.yaml`
    pub fn file_name(&self) -> String {
        format!("{}-{}.yaml", self.kind.to_lowercase(), self.name.replace(':', "-"))
    }
}

/// Load a source document of kind `T`
pub fn load<T>(path: &Path) -> Result<T>
where
    T: Resource + DeserializeOwned,
{
    ocp2kube_core::from_path(path).map_err(|e| CliError::input(path, e))
}

fn join_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("---\n{}", doc.yaml))
        .collect()
}

fn write_files(dir: &Path, documents: &[Document]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for doc in documents {
        let path = dir.join(doc.file_name());
        std::fs::write(&path, &doc.yaml)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
