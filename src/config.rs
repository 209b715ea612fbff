//! Per-lookup configuration and resolver selection.
//!
//! A [`ResolverConfig`] is supplied fresh on every lookup and mapped to a
//! [`ResolverChoice`] by [`ResolverConfig::select()`]. Selection is a pure
//! function: no side effects, no failure modes.

use std::fmt::Display;

use crate::oracle::DEFAULT_CHECKIP_URL;

/// Input configuration for a single WAN address lookup.
///
/// `dns` is deliberately an `Option<bool>` rather than a plain bool: "unset"
/// and "explicitly true" both select the DNS oracle, while only an explicit
/// `false` switches to the default HTTP oracle. A two-valued type cannot
/// express that distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolverConfig {
    /// Force the DNS oracle when `true` or unset; force the default HTTP
    /// oracle when explicitly `false`
    pub dns: Option<bool>,
    /// Force the HTTP oracle against this URL when set and non-empty
    pub http: Option<String>,
}

/// The resolver strategy a lookup will use, computed once per lookup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolverChoice {
    Dns,
    Http { url: String },
}

/// Which kind of resolver produced a result. Displays as `dns` / `http`,
/// which is also how it is embedded in record identities.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResolverKind {
    Dns,
    Http,
}

impl Display for ResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverKind::Dns => write!(f, "dns"),
            ResolverKind::Http => write!(f, "http"),
        }
    }
}

impl ResolverConfig {
    /// Map this configuration to a [`ResolverChoice`].
    ///
    /// Precedence, first match wins:
    /// 1. `http` set and non-empty: HTTP against that URL. A simultaneously
    ///    set `dns` is silently ignored.
    /// 2. `dns` explicitly `false`: HTTP against [`DEFAULT_CHECKIP_URL`].
    /// 3. Everything else (nothing set, or `dns` explicitly `true`): DNS.
    pub fn select(&self) -> ResolverChoice {
        if let Some(url) = &self.http {
            if !url.is_empty() {
                return ResolverChoice::Http {
                    url: url.to_owned(),
                };
            }
        }
        match self.dns {
            Some(false) => ResolverChoice::Http {
                url: DEFAULT_CHECKIP_URL.to_owned(),
            },
            _ => ResolverChoice::Dns,
        }
    }
}
