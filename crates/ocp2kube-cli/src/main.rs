//! ocp2kube CLI - Translate OpenShift resources into Kubernetes resources

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod display;
mod error;
mod exit_codes;

use error::CliError;

#[derive(Parser)]
#[command(name = "ocp2kube")]
#[command(version)]
#[command(about = "Translate OpenShift resources into Kubernetes, Contour and RBAC resources", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Caller name used to prefix annotation keys [default: ocp2kube]
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Wildcard domain for rewritten hosts (example.com, .example.com or *.example.com)
    #[arg(long, global = true, env = "OCP2KUBE_DOMAIN")]
    pub domain: Option<String>,

    /// Settings file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write one file per resource here instead of printing to stdout
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a Route and its Service into an HTTPProxy
    Route {
        /// Route file (JSON or YAML)
        route: PathBuf,

        /// Service the Route targets
        service: PathBuf,
    },

    /// Translate SecurityContextConstraints into a PodSecurityPolicy and RBAC
    Scc {
        /// SecurityContextConstraints file
        scc: PathBuf,
    },

    /// Translate a DeploymentConfig into a Deployment
    Dc {
        /// DeploymentConfig file
        deployment_config: PathBuf,
    },

    /// Translate an Ingress into an HTTPProxy
    Ingress {
        /// Ingress file
        ingress: PathBuf,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let ctx = commands::Context::from_args(&cli.global)?;

    match cli.command {
        Commands::Route { route, service } => commands::route::run(&ctx, &route, &service),
        Commands::Scc { scc } => commands::scc::run(&ctx, &scc),
        Commands::Dc { deployment_config } => commands::dc::run(&ctx, &deployment_config),
        Commands::Ingress { ingress } => commands::ingress::run(&ctx, &ingress),
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new::<CliError>(err));
        std::process::exit(code);
    }
}
