//! OpenShift source resource models
//!
//! Only the fields the converters read (or flag as unsupported) are modeled;
//! unknown fields are ignored on decode.

pub mod apps;
pub mod route;
pub mod security;

pub use apps::{
    DeploymentCondition, DeploymentConfig, DeploymentConfigSpec, DeploymentConfigStatus,
    DeploymentStrategy, DeploymentStrategyType, RollingDeploymentStrategyParams,
};
pub use route::{Route, RoutePort, RouteSpec, RouteTargetReference, TlsConfig, TlsTermination};
pub use security::{
    AllowedFlexVolume, FsGroupStrategyOptions, RunAsUserStrategyOptions,
    SeLinuxContextStrategyOptions, SecurityContextConstraints, SupplementalGroupsStrategyOptions,
};
