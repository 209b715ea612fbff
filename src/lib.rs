//! Main crate for the `network_info_helper` application.
//!
//! The crate answers exactly one question: what is the WAN IPv4 address of
//! the machine it runs on, as seen from the public internet?
//!
//! The following modules might be of interest if you want to add new functionality:
//! - [`oracle`]s query an external service for the caller's apparent public address
//! - [`extract`] pulls the first IPv4 literal out of a raw oracle response
//! - [`config`] decides which oracle a lookup should talk to
//! - [`lookup`] ties the above together into a single read operation

#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod extract;
pub mod lookup;
pub mod oracle;
