//! URL scheme factory
//!
//! Maps scheme strings to transport parameters. The table is data: adding a
//! scheme (say `tls+hlx`) means adding one entry and a constructor branch in
//! the manager, nothing else.

use url::Url;

use crate::error::{NetworkError, Result};

/// One factory table entry
struct SchemeEntry {
    scheme: &'static str,
    default_port: u16,
}

const SCHEMES: &[SchemeEntry] = &[SchemeEntry {
    scheme: "telnet",
    default_port: 23,
}];

/// A resolved connection target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketTarget {
    pub host: String,
    pub port: u16,
}

impl SocketTarget {
    /// `host:port` form for socket APIs
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// True only for schemes the factory recognizes
pub fn supports_scheme(scheme: &str) -> bool {
    SCHEMES.iter().any(|entry| entry.scheme == scheme)
}

/// Resolve a URL to its socket target
///
/// Applies the scheme's default port when the URL names none.
pub fn resolve(url: &str) -> Result<SocketTarget> {
    let parsed = Url::parse(url)
        .map_err(|e| NetworkError::InitializationFailed(format!("URL '{url}': {e}")))?;

    let entry = SCHEMES
        .iter()
        .find(|entry| entry.scheme == parsed.scheme())
        .ok_or_else(|| NetworkError::UnsupportedScheme(parsed.scheme().to_string()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| NetworkError::InitializationFailed(format!("URL '{url}' has no host")))?
        .to_string();

    Ok(SocketTarget {
        host,
        port: parsed.port().unwrap_or(entry.default_port),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telnet_default_port() {
        let target = resolve("telnet://192.168.1.40").unwrap();
        assert_eq!(target, SocketTarget { host: "192.168.1.40".to_string(), port: 23 });
    }

    #[test]
    fn test_explicit_port() {
        let target = resolve("telnet://localhost:2323").unwrap();
        assert_eq!(target.authority(), "localhost:2323");
    }

    #[test]
    fn test_unsupported_scheme() {
        assert!(supports_scheme("telnet"));
        assert!(!supports_scheme("ssh"));
        assert!(matches!(
            resolve("ssh://host"),
            Err(NetworkError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(
            resolve("not a url"),
            Err(NetworkError::InitializationFailed(_))
        ));
    }
}
