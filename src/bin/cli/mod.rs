use clap::Parser;

macro_rules! env_prefix {
    () => {
        "NETWORK_INFO_"
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Resolve via DNS when true or omitted; via the default HTTP service
    /// when explicitly false
    #[arg(
        long,
        value_name = "BOOL",
        env = concat!(env_prefix!(), "DNS")
    )]
    pub dns: Option<bool>,

    /// Fetch the address from this URL instead of using DNS.
    /// Takes precedence over --dns
    #[arg(
        long,
        value_name = "URL",
        env = concat!(env_prefix!(), "HTTP")
    )]
    pub http: Option<String>,

    /// Set the loglevel of the application
    #[arg(
        value_enum,
        short = 'l',
        long,
        default_value_t = Loglevel::Info,
        value_name = "LEVEL",
        env = concat!(env_prefix!(), "LOGLEVEL")
    )]
    pub loglevel: Loglevel,
}

use clap::ValueEnum;
use log::LevelFilter;

/// Used to set the applications loglevel
// This is essentially a re-creation of log:Level. However, that enum doesn't derive ValueEnum, so we have to do it manually here
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Loglevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl From<Loglevel> for LevelFilter {
    fn from(ll: Loglevel) -> Self {
        match ll {
            Loglevel::Error => LevelFilter::Error,
            Loglevel::Warn => LevelFilter::Warn,
            Loglevel::Info => LevelFilter::Info,
            Loglevel::Debug => LevelFilter::Debug,
            Loglevel::Trace => LevelFilter::Trace,
        }
    }
}
