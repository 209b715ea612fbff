//! Scanning raw oracle responses for an IPv4 literal.

use regex::bytes::Regex;

/// Finds the first quad-dotted IPv4 literal in a byte slice.
///
/// The pattern matches four groups of 1-3 decimal digits separated by
/// periods. Octets are not bounded to 255, so `1.2.3.444` is accepted; the
/// oracles we talk to only ever return well-formed addresses, and keeping the
/// pattern loose matches their historical behavior.
///
/// The pattern is compiled once when the extractor is created and reused for
/// every call to [`AddressExtractor::extract()`].
#[derive(Debug, Clone)]
pub struct AddressExtractor {
    pattern: Regex,
}

const IPV4_PATTERN: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";

impl AddressExtractor {
    pub fn new() -> Self {
        AddressExtractor {
            // The pattern is a valid literal, so compilation cannot fail
            pattern: Regex::new(IPV4_PATTERN).unwrap(),
        }
    }

    /// Returns the first IPv4-shaped substring in `data`, or [`None`] if the
    /// data contains no such substring.
    pub fn extract(&self, data: &[u8]) -> Option<String> {
        self.pattern
            .find(data)
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}
