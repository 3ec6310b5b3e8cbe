//! IMAP command handlers for the fake server.
//!
//! Each handler lives in its own module and processes a single IMAP
//! command (LOGIN, LSUB, EXAMINE, SEARCH, FETCH, CLOSE, LOGOUT).

mod fetch;
mod logout;

pub use close::handle_close;
pub use examine::handle_examine;
pub use fetch::handle_fetch;
pub use login::handle_login;
pub use logout::handle_logout;
pub use lsub::handle_lsub;
pub use search::handle_search;
