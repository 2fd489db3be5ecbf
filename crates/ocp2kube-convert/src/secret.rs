//! TLS Secret materialization

use std::collections::BTreeMap;

use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub const TLS_SECRET_TYPE: &str = "kubernetes.io/tls";
pub const TLS_CERT_KEY: &str = "tls.crt";
pub const TLS_PRIVATE_KEY_KEY: &str = "tls.key";

/// Build a `kubernetes.io/tls` Secret from inline PEM material
///
/// `ByteString` holds the raw bytes and serializes them as base64, so the
/// PEM text is encoded exactly once in the output document.
pub fn materialize_secret(name: &str, namespace: &str, certificate: &str, key: &str) -> Secret {
    let data: BTreeMap<String, ByteString> = [
        (TLS_CERT_KEY.to_string(), ByteString(certificate.as_bytes().to_vec())),
        (TLS_PRIVATE_KEY_KEY.to_string(), ByteString(key.as_bytes().to_vec())),
    ]
    .into_iter()
    .collect();

    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        type_: Some(TLS_SECRET_TYPE.to_string()),
        data: Some(data),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_shape() {
        let secret = materialize_secret("hpsecret-web", "shop", "CERT", "KEY");
        assert_eq!(secret.metadata.name.as_deref(), Some("hpsecret-web"));
        assert_eq!(secret.metadata.namespace.as_deref(), Some("shop"));
        assert_eq!(secret.type_.as_deref(), Some(TLS_SECRET_TYPE));

        let data = secret.data.unwrap();
        assert_eq!(data[TLS_CERT_KEY].0, b"CERT");
        assert_eq!(data[TLS_PRIVATE_KEY_KEY].0, b"KEY");
    }

    #[test]
    fn test_data_serializes_as_base64() {
        let secret = materialize_secret("s", "ns", "CERT", "KEY");
        let value = serde_json::to_value(&secret).unwrap();
        assert_eq!(value["data"]["tls.crt"], "Q0VSVA==");
        assert_eq!(value["data"]["tls.key"], "S0VZ");
        assert_eq!(value["kind"], "Secret");
    }
}
