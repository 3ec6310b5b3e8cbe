//! Scan records
//!
//! One row per scanned message. Records are append-only; nothing in
//! the tool ever updates or deletes one.

use chrono::{DateTime, Utc};

/// A single observation of a message during a mailbox scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    /// Time the record was created.
    pub ts: DateTime<Utc>,
    /// Host the scanned account lives on.
    pub host: String,
    /// Account user, truncated at the first `*` so that suffixed
    /// login forms collapse to the plain address.
    pub user: String,
    /// Mailbox the message was found in.
    pub mailbox: String,
    /// Message UID within the mailbox.
    pub uid: String,
    /// Message-ID header value, absent when the message has none.
    pub mid: Option<String>,
    /// Peer host checked for the same Message-ID, when comparing.
    pub otherhost: Option<String>,
    /// Whether the Message-ID was found on the peer.
    pub found: bool,
}

impl ScanRecord {
    pub fn new(host: &str, user: &str, mailbox: &str, uid: String, mid: Option<String>) -> Self {
        let user = user.split('*').next().unwrap_or(user).to_string();
        Self {
            ts: Utc::now(),
            host: host.to_string(),
            user,
            mailbox: mailbox.to_string(),
            uid,
            mid,
            otherhost: None,
            found: false,
        }
    }
}
