use std::fmt::Display;
use std::process::Command;

#[cfg(test)]
use mockall::automock;

/* OpenDNS runs a sentinel hostname that resolves to whatever address the
query arrived from, which saves us an HTTP round trip */
const LOOKUP_BIN: &str = "dig";
const QUERY_HOSTNAME: &str = "myip.opendns.com";
const QUERY_SERVER: &str = "@resolver1.opendns.com";

/// Error returned when the external DNS lookup tool could not be started or
/// exited abnormally. Carries the tool's own diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalToolError {
    msg: String,
}
impl Display for ExternalToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}
impl std::error::Error for ExternalToolError {}
impl From<String> for ExternalToolError {
    fn from(s: String) -> Self {
        ExternalToolError { msg: s }
    }
}

/// Narrow seam around the external lookup invocation, so tests can substitute
/// a fake without spawning a real process.
#[cfg_attr(test, automock)]
pub trait LookupCommand {
    /// Run the lookup once and return its raw stdout.
    fn run(&self) -> Result<Vec<u8>, ExternalToolError>;
}

/// Production [`LookupCommand`]: runs
/// `dig +short myip.opendns.com @resolver1.opendns.com` and captures stdout.
#[derive(Debug, Clone, Default)]
pub struct DigCommand;

impl LookupCommand for DigCommand {
    fn run(&self) -> Result<Vec<u8>, ExternalToolError> {
        let output = Command::new(LOOKUP_BIN)
            .args(["+short", QUERY_HOSTNAME, QUERY_SERVER])
            .output()
            .map_err(|e| format!("could not run {}: {}", LOOKUP_BIN, e))?;
        if !output.status.success() {
            return Err(format!(
                "{} exited with {}: {}",
                LOOKUP_BIN,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )
            .into());
        }
        Ok(output.stdout)
    }
}

/// Obtains the caller's apparent address by way of a DNS echo query.
///
/// The query is fixed: the `+short` form of a lookup for a sentinel hostname
/// against a sentinel resolver server, so the only thing in stdout is the
/// terse answer. No caching, each call to [`DnsOracle::resolve()`] runs the
/// tool again.
pub struct DnsOracle {
    command: Box<dyn LookupCommand>,
}

impl DnsOracle {
    pub fn new() -> Self {
        DnsOracle {
            command: Box::new(DigCommand),
        }
    }

    /// Create an oracle backed by a custom [`LookupCommand`].
    pub fn with_command(command: Box<dyn LookupCommand>) -> Self {
        DnsOracle { command }
    }

    /// Run the lookup and return the raw stdout bytes.
    pub fn resolve(&self) -> Result<Vec<u8>, ExternalToolError> {
        self.command.run()
    }
}

impl Default for DnsOracle {
    fn default() -> Self {
        Self::new()
    }
}
