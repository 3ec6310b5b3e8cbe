//! LOGOUT command handler.
//!
//! The server sends an untagged BYE before the tagged OK, per
//! RFC 3501 Section 7.1.5, then the connection is torn down.

use crate::fake_imap::io::write_line;
use std::io::{BufReader, Read, Write};

/// Handle the LOGOUT command.
pub fn handle_logout<S: Read + Write>(tag: &str, stream: &mut BufReader<S>) {
    let _ = write_line(stream, "* BYE Logging out\r\n");
    let resp = format!("{tag} OK LOGOUT completed\r\n");
    let _ = write_line(stream, &resp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sends_bye_then_tagged_ok() {
        let mut stream = BufReader::new(Cursor::new(Vec::new()));
        handle_logout("a10", &mut stream);
        let output = String::from_utf8(stream.into_inner().into_inner()).unwrap();
        assert_eq!(output, "* BYE Logging out\r\na10 OK LOGOUT completed\r\n");
    }
}
