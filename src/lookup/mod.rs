//! The read operation: select an oracle, query it, extract the address.

use std::fmt::Display;

use log::{debug, trace};
use thiserror::Error;

use crate::config::{ResolverChoice, ResolverConfig, ResolverKind};
use crate::extract::AddressExtractor;
use crate::oracle::{DnsOracle, ExternalToolError, HttpOracle, NetworkError};

/// Prefix for the identity every successful lookup reports. The resolver kind
/// is appended so that results obtained through different resolvers stay
/// distinguishable even when the address matches.
pub const IDENTITY_PREFIX: &str = "_network_info-";

/// The result of a successful lookup. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WanIpInfo {
    /// IP address of the calling machine as seen on the current wide area
    /// network (WAN), in quad-dotted notation
    pub wan_ip_address: String,
    /// Which resolver produced the address
    pub resolver: ResolverKind,
    /// Stable record key for consumers, e.g. `_network_info-dns`
    pub identity: String,
}

impl Display for WanIpInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (via {})", self.wan_ip_address, self.resolver)
    }
}

/// Any of the ways a lookup can fail. Oracle errors pass through verbatim;
/// nothing is retried and there is no fallback from one resolver to the
/// other.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0}")]
    ExternalTool(ExternalToolError),
    #[error("{0}")]
    Network(NetworkError),
    #[error("no IPv4 address in response from {resolver} resolver: {response:?}")]
    Extraction {
        resolver: ResolverKind,
        /// The raw oracle response, verbatim, for diagnosability
        response: String,
    },
}
impl From<ExternalToolError> for LookupError {
    fn from(e: ExternalToolError) -> Self {
        LookupError::ExternalTool(e)
    }
}
impl From<NetworkError> for LookupError {
    fn from(e: NetworkError) -> Self {
        LookupError::Network(e)
    }
}

/// A single-shot WAN address lookup.
///
/// Each call to [`WanIpLookup::read()`] selects exactly one resolver from the
/// supplied [`ResolverConfig`], queries it once, and extracts the address
/// from the raw response. The lookup holds no state between calls; repeated
/// reads may return different addresses if the network egress point changes.
pub struct WanIpLookup {
    dns: DnsOracle,
    http: HttpOracle,
    extractor: AddressExtractor,
}

impl WanIpLookup {
    pub fn new() -> Self {
        WanIpLookup {
            dns: DnsOracle::new(),
            http: HttpOracle::new(),
            extractor: AddressExtractor::new(),
        }
    }

    /// Create a lookup backed by custom oracles.
    pub fn with_oracles(dns: DnsOracle, http: HttpOracle) -> Self {
        WanIpLookup {
            dns,
            http,
            extractor: AddressExtractor::new(),
        }
    }

    /// Perform one read: select, resolve, extract.
    pub fn read(&self, config: &ResolverConfig) -> Result<WanIpInfo, LookupError> {
        let (raw, resolver) = match config.select() {
            ResolverChoice::Dns => {
                debug!("Resolving WAN address via DNS oracle");
                (self.dns.resolve()?, ResolverKind::Dns)
            }
            ResolverChoice::Http { url } => {
                debug!("Resolving WAN address via HTTP oracle at {}", url);
                (self.http.resolve(&url)?, ResolverKind::Http)
            }
        };
        trace!("Raw oracle response: {:?}", String::from_utf8_lossy(&raw));

        let wan_ip_address =
            self.extractor
                .extract(&raw)
                .ok_or_else(|| LookupError::Extraction {
                    resolver,
                    response: String::from_utf8_lossy(&raw).into_owned(),
                })?;
        Ok(WanIpInfo {
            wan_ip_address,
            resolver,
            identity: format!("{}{}", IDENTITY_PREFIX, resolver),
        })
    }
}

impl Default for WanIpLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{MockHttpTransport, MockLookupCommand};

    fn lookup_with_dns_response(response: &'static [u8]) -> WanIpLookup {
        let mut command = MockLookupCommand::new();
        command.expect_run().returning(move || Ok(response.to_vec()));
        // HTTP oracle must never be touched when DNS is selected
        let transport = MockHttpTransport::new();
        WanIpLookup::with_oracles(
            DnsOracle::with_command(Box::new(command)),
            HttpOracle::with_transport(Box::new(transport)),
        )
    }

    fn lookup_with_http_response(response: &'static [u8]) -> WanIpLookup {
        let command = MockLookupCommand::new();
        let mut transport = MockHttpTransport::new();
        transport
            .expect_fetch()
            .returning(move |_| Ok(response.to_vec()));
        WanIpLookup::with_oracles(
            DnsOracle::with_command(Box::new(command)),
            HttpOracle::with_transport(Box::new(transport)),
        )
    }

    #[test]
    fn should_resolve_via_dns_by_default() {
        let lookup = lookup_with_dns_response(b"203.0.113.5\n");
        let info = lookup.read(&ResolverConfig::default()).unwrap();
        assert_eq!(
            info,
            WanIpInfo {
                wan_ip_address: "203.0.113.5".to_string(),
                resolver: ResolverKind::Dns,
                identity: "_network_info-dns".to_string(),
            }
        );
    }

    #[test]
    fn should_resolve_via_http_with_explicit_url() {
        let lookup = lookup_with_http_response(b"198.51.100.7");
        let config = ResolverConfig {
            dns: None,
            http: Some("https://example.test/ip".to_string()),
        };
        let info = lookup.read(&config).unwrap();
        assert_eq!(
            info,
            WanIpInfo {
                wan_ip_address: "198.51.100.7".to_string(),
                resolver: ResolverKind::Http,
                identity: "_network_info-http".to_string(),
            }
        );
    }

    #[test]
    fn should_resolve_via_http_when_dns_is_false() {
        let command = MockLookupCommand::new();
        let mut transport = MockHttpTransport::new();
        transport
            .expect_fetch()
            .withf(|url| url == crate::oracle::DEFAULT_CHECKIP_URL)
            .times(1)
            .returning(|_| Ok(b"192.0.2.80\n".to_vec()));
        let lookup = WanIpLookup::with_oracles(
            DnsOracle::with_command(Box::new(command)),
            HttpOracle::with_transport(Box::new(transport)),
        );

        let config = ResolverConfig {
            dns: Some(false),
            http: None,
        };
        let info = lookup.read(&config).unwrap();
        assert_eq!(info.wan_ip_address, "192.0.2.80");
        assert_eq!(info.resolver, ResolverKind::Http);
    }

    #[test]
    fn should_fail_extraction_with_resolver_and_raw_response() {
        let lookup = lookup_with_dns_response(b"connection refused; no servers could be reached");
        let err = lookup.read(&ResolverConfig::default()).unwrap_err();
        match &err {
            LookupError::Extraction { resolver, response } => {
                assert_eq!(*resolver, ResolverKind::Dns);
                assert_eq!(response, "connection refused; no servers could be reached");
            }
            e => panic!("expected extraction error, got {:?}", e),
        }
        let msg = err.to_string();
        assert!(msg.contains("dns"));
        assert!(msg.contains("no servers could be reached"));
    }

    #[test]
    fn should_propagate_dns_oracle_error_unchanged() {
        let mut command = MockLookupCommand::new();
        command
            .expect_run()
            .returning(|| Err("could not run dig: No such file or directory".to_string().into()));
        let lookup = WanIpLookup::with_oracles(
            DnsOracle::with_command(Box::new(command)),
            HttpOracle::with_transport(Box::new(MockHttpTransport::new())),
        );

        let err = lookup.read(&ResolverConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not run dig: No such file or directory"
        );
    }

    #[test]
    fn should_propagate_http_oracle_error_unchanged() {
        let command = MockLookupCommand::new();
        let mut transport = MockHttpTransport::new();
        transport
            .expect_fetch()
            .returning(|_| Err("error sending request: dns error".to_string().into()));
        let lookup = WanIpLookup::with_oracles(
            DnsOracle::with_command(Box::new(command)),
            HttpOracle::with_transport(Box::new(transport)),
        );

        let config = ResolverConfig {
            dns: None,
            http: Some("https://example.test/ip".to_string()),
        };
        let err = lookup.read(&config).unwrap_err();
        assert_eq!(err.to_string(), "error sending request: dns error");
    }
}
