//! SMTP reply grammar.
//!
//! SMTP replies can be single-line or multi-line:
//! - Single: `250 OK\r\n`
//! - Multi: `250-First line\r\n250-Second line\r\n250 Last line\r\n`
//!
//! A reply is complete only once a final line has been seen: three ASCII
//! digits followed by a space. Dash-continued lines are accumulated; the
//! read loop (on the session) keeps draining until the final line arrives.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Checks whether a line terminates a (possibly multi-line) reply.
///
/// Final lines match `^[0-9]{3} `; anything else, including dash-continued
/// lines such as `250-STARTTLS`, keeps the reply open.
#[must_use]
pub fn is_final_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 4 && bytes[..3].iter().all(u8::is_ascii_digit) && bytes[3] == b' '
}

/// Parses a complete reply from its accumulated raw lines.
///
/// The code is taken from the last line, which the read loop guarantees is
/// the final one. All raw lines are kept for diagnostics.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if the lines are empty or the final line
/// does not carry a numeric code.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let Some(last) = lines.last() else {
        return Err(Error::Protocol("empty reply".into()));
    };
    if last.len() < 3 {
        return Err(Error::Protocol(format!("reply line too short: {last:?}")));
    }

    let code = last[..3]
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("invalid reply code in {last:?}")))?;

    Ok(Reply::new(ReplyCode::new(code), lines.to_vec()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ReplyCategory;

    #[test]
    fn single_line_reply() {
        let lines = vec!["250 OK".to_string()];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.category(), ReplyCategory::Ready);
        assert_eq!(reply.lines, vec!["250 OK"]);
    }

    #[test]
    fn multi_line_reply_keeps_every_line() {
        let lines = vec![
            "250-mail.example.com".to_string(),
            "250-SIZE 35882577".to_string(),
            "250 OK".to_string(),
        ];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.lines.len(), 3);
    }

    #[test]
    fn greeting() {
        let lines = vec!["220 mail.example.com ESMTP ready".to_string()];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.code, ReplyCode::SERVICE_READY);
    }

    #[test]
    fn permanent_rejection() {
        let lines = vec!["550 rejected".to_string()];
        let reply = parse_reply(&lines).unwrap();
        assert_eq!(reply.category(), ReplyCategory::PermanentError);
    }

    #[test]
    fn final_line_grammar() {
        assert!(is_final_line("250 OK"));
        assert!(is_final_line("354 go ahead"));
        assert!(is_final_line("550 no"));
        assert!(!is_final_line("250-Continuing"));
        assert!(!is_final_line("250"));
        assert!(!is_final_line("25x OK"));
        assert!(!is_final_line("hello world"));
        assert!(!is_final_line(""));
    }

    #[test]
    fn empty_reply_is_a_protocol_error() {
        assert!(parse_reply(&[]).is_err());
    }

    #[test]
    fn short_line_is_a_protocol_error() {
        assert!(parse_reply(&["25".to_string()]).is_err());
    }

    #[test]
    fn non_numeric_code_is_a_protocol_error() {
        assert!(parse_reply(&["ABC OK".to_string()]).is_err());
    }
}
