//! IMAP account sessions
//!
//! One blocking TLS connection per account. All commands run
//! strictly sequentially; nothing here is shared across threads.
//!
//! Certificate verification is disabled: the tool talks to
//! operator-controlled servers that frequently carry self-signed or
//! mismatched certificates, and it never writes to the mailbox.

use std::net::TcpStream;

use native_tls::{TlsConnector, TlsStream};
use tracing::{debug, info, warn};

use crate::config::{Credentials, ServerAddr};
use crate::error::{Error, Result};
use crate::listing::{decode_entry, subscribed_entries};

type ImapSession = imap::Session<TlsStream<TcpStream>>;

/// An authenticated, read-only session against one account.
pub struct AccountSession {
    session: ImapSession,
    addr: ServerAddr,
    user: String,
    search_term: String,
    selected: Option<String>,
    finished: bool,
}

impl AccountSession {
    /// Connect and log in.
    ///
    /// Authentication failure is fatal for the account; no retry is
    /// attempted.
    pub fn connect(addr: ServerAddr, creds: &Credentials, search_term: &str) -> Result<Self> {
        let tls = TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| Error::Tls(e.to_string()))?;
        debug!(host = %addr.host, port = addr.port, "connecting");
        let client = imap::connect((addr.host.as_str(), addr.port), &addr.host, &tls)
            .map_err(|e| Error::Tls(e.to_string()))?;
        let mut session = client
            .login(&creds.user, &creds.password)
            .map_err(|(e, _)| Error::Auth(e.to_string()))?;
        info!(host = %addr.host, user = %creds.user, "logged in");

        // UTF8=ACCEPT is best effort; servers without the capability
        // just reject the command and we carry on with mUTF-7 names.
        if let Err(e) = session.run_command_and_read_response("ENABLE UTF8=ACCEPT") {
            debug!(error = %e, "ENABLE UTF8=ACCEPT not accepted");
        }

        Ok(Self {
            session,
            addr,
            user: creds.user.clone(),
            search_term: search_term.to_string(),
            selected: None,
            finished: false,
        })
    }

    pub fn host(&self) -> &str {
        &self.addr.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// All subscribed mailbox names, decoded from the raw LSUB reply.
    pub fn list_mailboxes(&mut self) -> Result<Vec<String>> {
        let reply = self
            .session
            .run_command_and_read_response("LSUB \"\" \"*\"")
            .map_err(|e| Error::Imap(e.to_string()))?;
        let mut names = Vec::new();
        for entry in subscribed_entries(&reply) {
            names.push(decode_entry(&entry)?);
        }
        debug!(host = %self.addr.host, count = names.len(), "listed subscribed mailboxes");
        Ok(names)
    }

    /// Select `mailbox` read-only.
    ///
    /// Returns the message count on a fresh selection and `None` when
    /// the mailbox is already the selected one. On failure the
    /// session has no selected mailbox.
    pub fn select_readonly(&mut self, mailbox: &str) -> Result<Option<u32>> {
        if self.selected.as_deref() == Some(mailbox) {
            return Ok(None);
        }
        self.selected = None;
        let selected = self
            .session
            .examine(mailbox)
            .map_err(|e| Error::Imap(e.to_string()))?;
        self.selected = Some(mailbox.to_string());
        Ok(Some(selected.exists))
    }

    /// Sequence numbers of messages matching the session search term,
    /// in ascending order.
    pub fn search_ids(&mut self) -> Result<Vec<u32>> {
        let ids = self
            .session
            .search(&self.search_term)
            .map_err(|e| Error::Imap(e.to_string()))?;
        let mut ids: Vec<u32> = ids.into_iter().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Raw fetch reply carrying the UID and Message-ID header for the
    /// message with sequence number `id`.
    pub fn fetch_scan_fields(&mut self, id: u32) -> Result<String> {
        let reply = self
            .session
            .run_command_and_read_response(&format!(
                "FETCH {id} (UID BODY.PEEK[HEADER.FIELDS (MESSAGE-ID)])"
            ))
            .map_err(|e| Error::Imap(e.to_string()))?;
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    /// Whether any message in the selected mailbox carries `mid` as
    /// its Message-ID.
    pub fn contains_message_id(&mut self, mid: &str) -> Result<bool> {
        let ids = self
            .session
            .search(format!("HEADER MESSAGE-ID {mid}"))
            .map_err(|e| Error::Imap(e.to_string()))?;
        Ok(!ids.is_empty())
    }

    /// Close the selected mailbox (if any) and log out.
    pub fn disconnect(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.selected.take().is_some() {
            if let Err(e) = self.session.close() {
                warn!(host = %self.addr.host, error = %e, "CLOSE failed");
            }
        }
        if let Err(e) = self.session.logout() {
            warn!(host = %self.addr.host, error = %e, "LOGOUT failed");
        }
        debug!(host = %self.addr.host, "disconnected");
    }
}

impl Drop for AccountSession {
    fn drop(&mut self) {
        self.disconnect();
    }
}
