//! Hostname rehosting

/// Strip a leading `*.` or `.` so all accepted domain forms agree
pub fn normalize_domain(domain: &str) -> &str {
    domain
        .strip_prefix("*.")
        .or_else(|| domain.strip_prefix('.'))
        .unwrap_or(domain)
}

/// Join the first label of `host` with the normalized `domain`
///
/// `web.apps.ocp.example.com` on `*.k8s.example.com` becomes
/// `web.k8s.example.com`.
pub fn rewrite_host(host: &str, domain: &str) -> String {
    let label = host.split('.').next().unwrap_or(host);
    format!("{}.{}", label, normalize_domain(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_forms_agree() {
        assert_eq!(normalize_domain("example.com"), "example.com");
        assert_eq!(normalize_domain(".example.com"), "example.com");
        assert_eq!(normalize_domain("*.example.com"), "example.com");
    }

    #[test]
    fn test_rewrite_host() {
        for domain in ["k8s.example.com", ".k8s.example.com", "*.k8s.example.com"] {
            assert_eq!(
                rewrite_host("web.apps.ocp.example.com", domain),
                "web.k8s.example.com"
            );
        }
    }

    #[test]
    fn test_single_label_host() {
        assert_eq!(rewrite_host("web", "example.com"), "web.example.com");
    }
}
