//! Subscribed-mailbox listing decode
//!
//! An LSUB reply carries one entry per mailbox in the form
//!
//! ```text
//! * LSUB (\HasNoChildren) "/" "Sent Items"
//! ```
//!
//! The mailbox name is either the final quoted segment or, for
//! unquoted names, the third whitespace-delimited token of the entry.
//! A malformed entry is a hard error for the whole enumeration:
//! listing data is structurally trustworthy, and a violation points
//! at deeper IMAP misbehavior worth surfacing.

use crate::error::{Error, Result};

/// Extract the raw listing entries from an LSUB reply.
///
/// Each returned entry is the text after the `* LSUB ` prefix, e.g.
/// `(\HasNoChildren) "/" "INBOX"`. Untagged replies for other
/// commands and the tagged completion line are ignored.
pub(crate) fn subscribed_entries(reply: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(reply)
        .lines()
        .filter_map(|line| {
            let line = line.trim_end_matches('\r');
            if line.len() > 7 && line[..7].eq_ignore_ascii_case("* LSUB ") {
                Some(line[7..].to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Decode the mailbox name from one listing entry.
///
/// If the entry ends with a quote, the name is the innermost quoted
/// segment scanning from the end (this handles names that contain
/// the listing's own delimiters, such as spaces); the surrounding
/// quotes are stripped. Otherwise the name is the third
/// whitespace-delimited token of the entry.
///
/// # Errors
///
/// Returns [`Error::Listing`] if the entry fits neither form.
pub(crate) fn decode_entry(entry: &str) -> Result<String> {
    if let Some(stripped) = entry.strip_suffix('"') {
        match stripped.rfind('"') {
            Some(open) => Ok(stripped[open + 1..].to_string()),
            None => Err(Error::Listing(entry.to_string())),
        }
    } else {
        entry
            .split(' ')
            .nth(2)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| Error::Listing(entry.to_string()))
    }
}
