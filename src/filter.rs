//! Mailbox include/exclude filtering
//!
//! A mailbox participates in a scan iff its name does NOT match the
//! exclude pattern AND DOES match the include pattern. Both patterns
//! use search semantics (a match anywhere in the name counts) and are
//! compiled case-insensitively.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};

/// Compiled include/exclude predicate over mailbox names.
#[derive(Debug, Clone)]
pub struct MailboxFilter {
    exclude: Regex,
    include: Regex,
}

impl MailboxFilter {
    /// Compile an exclude and include pattern pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either pattern is not a valid regex.
    pub fn new(exclude: &str, include: &str) -> Result<Self> {
        Ok(Self {
            exclude: compile(exclude)?,
            include: compile(include)?,
        })
    }

    /// Whether the named mailbox should be scanned.
    ///
    /// A mailbox matching both patterns is excluded: exclude wins.
    #[must_use]
    pub fn needs_processing(&self, mailbox: &str) -> bool {
        !self.exclude.is_match(mailbox) && self.include.is_match(mailbox)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Config(format!("invalid mailbox pattern '{pattern}': {e}")))
}
