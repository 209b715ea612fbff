//! Oracles that report the caller's apparent public IPv4 address.
//!
//! An oracle is an external service queried solely to learn how this machine
//! is seen from the outside. Two oracles are currently available:
//! - [`DnsOracle`]: asks a well-known resolver for a hostname that echoes the
//!   querier's address
//! - [`HttpOracle`]: fetches a URL whose response body is the address
//!
//! Both return the raw response bytes; turning those into an address is the
//! job of [`crate::extract`].

mod dns;
mod http;

pub use dns::{DigCommand, DnsOracle, ExternalToolError, LookupCommand};
pub use http::{HttpOracle, HttpTransport, NetworkError, DEFAULT_CHECKIP_URL};

#[cfg(test)]
pub use dns::MockLookupCommand;
#[cfg(test)]
pub use http::MockHttpTransport;
