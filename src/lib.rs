//! Read-only IMAP mail-sync diagnostics.
//!
//! The crate scans one or more IMAP accounts, records every matching
//! message (UID and Message-ID) into an append-only SQLite store, and
//! can compare a primary account against peer accounts to find
//! messages missing on the other side.
//!
//! Nothing here ever modifies a mailbox: all selections are read-only
//! and fetches use peeking header fetches only.

pub mod config;
pub mod error;
pub mod filter;
mod listing;
mod parse;
pub mod record;
pub mod scanner;
pub mod session;
pub mod store;

pub use config::{Credentials, ServerAddr, DEFAULT_PORT};
pub use error::{Error, Result};
pub use filter::MailboxFilter;
pub use record::ScanRecord;
pub use session::AccountSession;
pub use store::ScanStore;
