//! ocp2kube Core - Typed resource models for OpenShift to Kubernetes migration
//!
//! This crate provides the resource types read and written by the converters:
//! - `openshift`: source kinds (`Route`, `SecurityContextConstraints`, `DeploymentConfig`)
//! - `contour`: the `HTTPProxy` custom resource
//! - `policy`: the `policy/v1beta1` `PodSecurityPolicy`
//! - `document`: JSON/YAML loading with kind checks
//!
//! Kinds that upstream Kubernetes already models (Service, Secret, Ingress,
//! Deployment, RBAC) are used straight from `k8s-openapi`.

/// Implements `k8s_openapi::Resource` and `k8s_openapi::Metadata` for a model
/// that carries its own `metadata: ObjectMeta`.
macro_rules! impl_resource {
    ($ty:ty, group = $group:literal, version = $version:literal, kind = $kind:literal, plural = $plural:literal, scope = $scope:ty) => {
        impl k8s_openapi::Resource for $ty {
            const API_VERSION: &'static str = concat!($group, "/", $version);
            const GROUP: &'static str = $group;
            const KIND: &'static str = $kind;
            const VERSION: &'static str = $version;
            const URL_PATH_SEGMENT: &'static str = $plural;
            type Scope = $scope;
        }

        impl k8s_openapi::Metadata for $ty {
            type Ty = k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

            fn metadata(&self) -> &Self::Ty {
                &self.metadata
            }

            fn metadata_mut(&mut self) -> &mut Self::Ty {
                &mut self.metadata
            }
        }
    };
}

pub mod contour;
pub mod document;
pub mod error;
pub mod openshift;
pub mod policy;

pub use contour::{HttpProxy, HttpProxySpec, MatchCondition, ProxyRoute, ProxyService, ProxyTls, VirtualHost};
pub use document::{from_json, from_path, from_yaml, to_yaml};
pub use error::{CoreError, Result};
pub use openshift::{DeploymentConfig, Route, SecurityContextConstraints};
pub use policy::{IdRange, PodSecurityPolicy, PodSecurityPolicySpec};

/// Re-exported so callers can name upstream kinds without a direct dependency
pub use k8s_openapi;
