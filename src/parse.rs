//! Header field extraction
//!
//! Pure parsing functions over the raw FETCH reply for a message.
//! Grammars (both case-insensitive):
//!
//! - UID: `UID <token>` where the token is the next run of
//!   non-whitespace characters
//! - Message-ID: `MESSAGE-ID: <token>`, same token rule

use once_cell::sync::Lazy;
use regex::Regex;

static UID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)UID\s+(\S+)").expect("valid UID pattern"));

static MID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)MESSAGE-ID:\s+(\S+)").expect("valid Message-ID pattern"));

/// Extract the message UID from a raw fetch reply.
pub(crate) fn uid(reply: &str) -> Option<String> {
    UID_RE
        .captures(reply)
        .map(|caps| caps[1].to_string())
}

/// Extract the Message-ID header value from a raw fetch reply.
///
/// Returns `None` when the header is missing or empty; callers
/// record such messages with a null message ID.
pub(crate) fn message_id(reply: &str) -> Option<String> {
    MID_RE
        .captures(reply)
        .map(|caps| caps[1].to_string())
}
