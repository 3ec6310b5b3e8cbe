//! Error types for imapdiag

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A transport-level IMAP failure (connect, select, search, fetch).
    #[error("IMAP error: {0}")]
    Imap(String),

    /// Login was rejected. Fatal for the affected server.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("TLS error: {0}")]
    Tls(String),

    /// A subscribed-mailbox listing entry that could not be decoded.
    /// Listing data is assumed structurally trustworthy, so this is
    /// surfaced loudly instead of being skipped.
    #[error("malformed mailbox listing entry: {0}")]
    Listing(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("result store error: {0}")]
    Store(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
