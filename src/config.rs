//! Server address and credential configuration

use crate::error::{Error, Result};
use std::env;

/// Default IMAP-over-TLS port.
pub const DEFAULT_PORT: u16 = 993;

/// A resolved IMAP server address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl ServerAddr {
    /// Parse a `host[:port]` server argument.
    ///
    /// The port defaults to 993 (implicit TLS) when omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or the port is not a
    /// valid number.
    pub fn parse(address: &str) -> Result<Self> {
        let (host, port) = match address.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|e| Error::Config(format!("invalid port in '{address}': {e}")))?;
                (host, port)
            }
            None => (address, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(Error::Config(format!("empty host in '{address}'")));
        }
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// Login credentials shared by all scanned servers.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    /// Resolve credentials from explicit values with environment
    /// fallback.
    ///
    /// Reads from `.env` if present. Fallback variables:
    /// - `IMAPDIAG_USER`
    /// - `IMAPDIAG_PASSWORD`
    ///
    /// # Errors
    ///
    /// Returns an error if either value is missing from both sources.
    pub fn resolve(user: Option<String>, password: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            user: user
                .or_else(|| env::var("IMAPDIAG_USER").ok())
                .ok_or_else(|| Error::Config("user name not provided".into()))?,
            password: password
                .or_else(|| env::var("IMAPDIAG_PASSWORD").ok())
                .ok_or_else(|| Error::Config("password not provided".into()))?,
        })
    }
}
