use std::fmt::Display;

#[cfg(test)]
use mockall::automock;

/// Default lookup URL, used when a lookup asks for HTTP without naming a URL.
/// The entire response body of this service is the caller's IP address.
pub const DEFAULT_CHECKIP_URL: &str = "https://checkip.amazonaws.com";

/// Error returned when an HTTP request failed at the transport level
/// (connection, DNS, TLS).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkError {
    msg: String,
}
impl Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl std::error::Error for NetworkError {}
impl From<String> for NetworkError {
    fn from(s: String) -> Self {
        NetworkError { msg: s }
    }
}

/// Narrow seam around the actual HTTP round trip, so tests can substitute a
/// fake without talking to the network.
#[cfg_attr(test, automock)]
pub trait HttpTransport {
    /// GET `url` and return the full response body.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkError>;
}

/// Production [`HttpTransport`] backed by a blocking [`reqwest`] client.
///
/// No explicit timeout is configured; the client's built-in default applies.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    fn new() -> Self {
        ReqwestTransport {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| NetworkError::from(e.to_string()))?;
        // The status code is intentionally not inspected here. A non-2xx body
        // still goes through extraction, and a body without an address shape
        // fails the lookup downstream.
        let body = response
            .bytes()
            .map_err(|e| NetworkError::from(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Obtains the caller's apparent address by fetching a URL whose response
/// body contains the address.
///
/// No caching, each call to [`HttpOracle::resolve()`] issues a fresh GET.
pub struct HttpOracle {
    transport: Box<dyn HttpTransport>,
}

impl HttpOracle {
    pub fn new() -> Self {
        HttpOracle {
            transport: Box::new(ReqwestTransport::new()),
        }
    }

    /// Create an oracle backed by a custom [`HttpTransport`].
    pub fn with_transport(transport: Box<dyn HttpTransport>) -> Self {
        HttpOracle { transport }
    }

    /// GET `url` and return the raw response body.
    pub fn resolve(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        self.transport.fetch(url)
    }
}

impl Default for HttpOracle {
    fn default() -> Self {
        Self::new()
    }
}
