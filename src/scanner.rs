//! Mailbox enumeration, message scanning and cross-account checks
//!
//! The scanner never writes to a mailbox. Per-message anomalies are
//! logged and counted; only authentication, listing decode and store
//! failures abort an account's scan.

use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::filter::MailboxFilter;
use crate::parse;
use crate::record::ScanRecord;
use crate::session::AccountSession;
use crate::store::ScanStore;

const INBOX: &str = "INBOX";

/// Candidate mailboxes for a scan, in processing order.
///
/// INBOX leads when the filter admits it, even if the server omits it
/// from the subscribed listing. Duplicate listing entries collapse to
/// one candidate.
pub fn enumerate_mailboxes(
    session: &mut AccountSession,
    filter: &MailboxFilter,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    if filter.needs_processing(INBOX) {
        names.push(INBOX.to_string());
    }
    for name in session.list_mailboxes()? {
        if !names.contains(&name) && filter.needs_processing(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Scan one selected mailbox, appending one record per message.
///
/// Returns the mismatch count for the mailbox. Records are committed
/// in a single batch once the mailbox's messages are exhausted.
pub fn scan_mailbox(
    session: &mut AccountSession,
    mailbox: &str,
    store: &mut ScanStore,
    mut peer: Option<&mut AccountSession>,
) -> Result<u64> {
    let ids = session.search_ids()?;
    debug!(mailbox, matches = ids.len(), "search complete");

    let mut mismatches = 0u64;
    for id in ids {
        let reply = session.fetch_scan_fields(id)?;
        let Some(uid) = parse::uid(&reply) else {
            error!(mailbox, id, "no UID in fetch reply");
            mismatches += 1;
            continue;
        };
        let mid = parse::message_id(&reply);
        if mid.is_none() {
            error!(mailbox, id, %uid, "message has no Message-ID header");
        }

        let mut record = ScanRecord::new(
            session.host(),
            session.user(),
            mailbox,
            uid,
            mid.clone(),
        );
        if let (Some(peer), Some(mid)) = (peer.as_deref_mut(), mid.as_deref()) {
            let found = message_exists(peer, mid, mailbox);
            record.otherhost = Some(peer.host().to_string());
            record.found = found;
            if !found {
                mismatches += 1;
            }
        }
        store.append(record);
    }

    store.commit_batch()?;
    if mismatches > 0 {
        warn!(mailbox, mismatches, "mailbox has mismatches");
    }
    Ok(mismatches)
}

/// Whether the peer's mailbox of the same name holds a message with
/// `mid` as its Message-ID.
///
/// Any protocol error during the check counts as "not found"; a
/// single flaky peer lookup must not abort the reconciliation.
pub fn message_exists(peer: &mut AccountSession, mid: &str, mailbox: &str) -> bool {
    if let Err(e) = peer.select_readonly(mailbox) {
        warn!(host = %peer.host(), mailbox, error = %e, "peer select failed");
        return false;
    }
    match peer.contains_message_id(mid) {
        Ok(found) => found,
        Err(e) => {
            warn!(host = %peer.host(), mailbox, mid, error = %e, "peer lookup failed");
            false
        }
    }
}

/// Scan every eligible mailbox of one account.
///
/// With a peer linked, every primary record is additionally checked
/// against the peer. Returns the account's total mismatch count.
pub fn scan_account(
    session: &mut AccountSession,
    filter: &MailboxFilter,
    store: &mut ScanStore,
    mut peer: Option<&mut AccountSession>,
) -> Result<u64> {
    let mut total = 0u64;
    for mailbox in enumerate_mailboxes(session, filter)? {
        if let Some(count) = session.select_readonly(&mailbox)? {
            info!(host = %session.host(), mailbox = %mailbox, messages = count, "scanning mailbox");
        }
        total += scan_mailbox(session, &mailbox, store, peer.as_deref_mut())?;
    }
    if total > 0 {
        warn!(host = %session.host(), mismatches = total, "scan finished with mismatches");
    } else {
        info!(host = %session.host(), "scan finished clean");
    }
    Ok(total)
}
