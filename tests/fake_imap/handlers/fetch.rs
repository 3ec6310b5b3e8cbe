//! FETCH command handler.
//!
//! Answers the header-only fetch the scanner issues:
//!
//! ```text
//! a5 FETCH 1 (UID BODY.PEEK[HEADER.FIELDS (MESSAGE-ID)])
//! ```
//!
//! The header block is returned as a **counted literal**:
//! `{bytecount}\r\n` followed by exactly that many raw bytes
//! (RFC 3501 Section 7.4.2). A message without the header yields an
//! empty header block (a bare CRLF).

use crate::fake_imap::account::Account;
use crate::fake_imap::io::write_line;
use imap_codec::imap_types::sequence::{SeqOrUid, Sequence, SequenceSet};
use std::io::{BufReader, Read, Write};

/// Extract sequence numbers from a `SequenceSet`. We only support
/// single values (not ranges) since the scanner fetches one message
/// at a time.
fn extract_seqs(seq_set: &SequenceSet) -> Vec<u32> {
    seq_set
        .0
        .as_ref()
        .iter()
        .filter_map(|seq| match seq {
            Sequence::Single(SeqOrUid::Value(v)) => Some(v.get()),
            _ => None,
        })
        .collect()
}

/// Handle the FETCH command. Returns the Message-ID header block as
/// an IMAP literal, plus the message UID.
pub fn handle_fetch<S: Read + Write>(
    tag: &str,
    sequence_set: &SequenceSet,
    account: &Account,
    selected: Option<&str>,
    stream: &mut BufReader<S>,
) {
    let Some(name) = selected else {
        let resp = format!("{tag} BAD No mailbox selected\r\n");
        let _ = write_line(stream, &resp);
        return;
    };

    let Some(mailbox) = account.get_mailbox(name) else {
        let resp = format!("{tag} BAD Mailbox not found\r\n");
        let _ = write_line(stream, &resp);
        return;
    };

    for seq in extract_seqs(sequence_set) {
        let Some(message) = mailbox.messages.get((seq as usize).saturating_sub(1)) else {
            continue;
        };
        let block = match &message.message_id {
            Some(mid) => format!("Message-ID: {mid}\r\n\r\n"),
            None => "\r\n".to_string(),
        };
        let uid = message.uid;
        let line = format!(
            "* {seq} FETCH (UID {uid} BODY[HEADER.FIELDS (MESSAGE-ID)] {{{}}}\r\n{block})\r\n",
            block.len()
        );
        if write_line(stream, &line).is_err() {
            return;
        }
    }

    let resp = format!("{tag} OK FETCH completed\r\n");
    let _ = write_line(stream, &resp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_imap::AccountBuilder;
    use std::io::Cursor;
    use std::num::NonZeroU32;

    fn seq_set(seq: u32) -> SequenceSet {
        SequenceSet(
            vec![Sequence::Single(SeqOrUid::Value(
                NonZeroU32::new(seq).unwrap(),
            ))]
            .try_into()
            .unwrap(),
        )
    }

    fn run(
        tag: &str,
        sequence_set: &SequenceSet,
        account: &Account,
        selected: Option<&str>,
    ) -> String {
        let mut stream = BufReader::new(Cursor::new(Vec::new()));
        handle_fetch(tag, sequence_set, account, selected, &mut stream);
        String::from_utf8(stream.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn returns_uid_and_message_id() {
        let account = AccountBuilder::new()
            .mailbox("INBOX")
            .message(42, Some("<a@x>"))
            .build();

        let output = run("a5", &seq_set(1), &account, Some("INBOX"));

        assert!(output.contains("* 1 FETCH (UID 42 BODY[HEADER.FIELDS (MESSAGE-ID)]"));
        assert!(output.contains("Message-ID: <a@x>\r\n"));
        assert!(output.contains("a5 OK FETCH completed"));
    }

    #[test]
    fn literal_length_matches_header_block() {
        let account = AccountBuilder::new()
            .mailbox("INBOX")
            .message(1, Some("<a@x>"))
            .build();

        let output = run("a5", &seq_set(1), &account, Some("INBOX"));

        let block_len = "Message-ID: <a@x>\r\n\r\n".len();
        assert!(output.contains(&format!("{{{block_len}}}")));
    }

    #[test]
    fn message_without_header_gets_empty_block() {
        let account = AccountBuilder::new()
            .mailbox("INBOX")
            .message(9, None)
            .build();

        let output = run("a5", &seq_set(1), &account, Some("INBOX"));

        assert!(output.contains("UID 9"));
        assert!(!output.contains("Message-ID:"));
    }

    #[test]
    fn out_of_range_sequence_returns_only_ok() {
        let account = AccountBuilder::new().mailbox("INBOX").build();

        let output = run("a5", &seq_set(3), &account, Some("INBOX"));

        assert_eq!(output, "a5 OK FETCH completed\r\n");
    }

    #[test]
    fn no_mailbox_selected_returns_bad() {
        let account = AccountBuilder::new().mailbox("INBOX").build();

        let output = run("a5", &seq_set(1), &account, None);

        assert!(output.contains("a5 BAD No mailbox selected"));
    }
}
