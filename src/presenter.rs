//! Turns workflow outcomes into terminal output.

use std::io::{self, Write};

use ic_core::workflow::{ClipOutcome, ClipSuccess};

/// Shown when the signer declines. Informational, not an error.
pub const DENIED_NOTICE: &str = "You denied the request from your wallet.";

/// One line of output and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Result, written to stdout.
    Result(String),
    /// Informational text, written to stderr.
    Notice(String),
    /// Failure text, written to stderr.
    Error(String),
}

pub fn render(outcome: &ClipOutcome) -> Vec<Line> {
    match outcome {
        ClipOutcome::Success(ClipSuccess::Created { code, cid }) => vec![
            Line::Result(code.to_string()),
            Line::Notice(format!("Stored on IPFS as {cid}")),
        ],
        ClipOutcome::Success(ClipSuccess::Resolved { url, .. }) => vec![Line::Result(url.clone())],
        ClipOutcome::Failure(failure) => vec![Line::Error(format!("Error: {failure}"))],
        ClipOutcome::Cancelled => vec![Line::Notice(DENIED_NOTICE.to_string())],
    }
}

/// Text worth putting on the clipboard: the new code or the resolved URL.
pub fn clipboard_text(outcome: &ClipOutcome) -> Option<&str> {
    match outcome {
        ClipOutcome::Success(ClipSuccess::Created { code, .. }) => Some(code.as_str()),
        ClipOutcome::Success(ClipSuccess::Resolved { url, .. }) => Some(url.as_str()),
        _ => None,
    }
}

/// A cancelled submission is not a failure of the process.
pub fn is_ok(outcome: &ClipOutcome) -> bool {
    !matches!(outcome, ClipOutcome::Failure(_))
}

/// Results go to `out`; notices and errors always go to stderr.
pub fn print<W: Write>(lines: &[Line], out: &mut W) -> io::Result<()> {
    for line in lines {
        match line {
            Line::Result(text) => writeln!(out, "{text}")?,
            Line::Notice(text) | Line::Error(text) => eprintln!("{text}"),
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ic_core::clip::ClipCode;
    use ic_core::ids::ContentId;
    use ic_core::workflow::ClipFailure;

    fn created() -> ClipOutcome {
        ClipOutcome::Success(ClipSuccess::Created {
            code: ClipCode::parse("IABLO").unwrap(),
            cid: ContentId::from("QmClip"),
        })
    }

    #[test]
    fn created_clip_prints_code_and_content_id() {
        assert_eq!(
            render(&created()),
            vec![
                Line::Result("IABLO".to_string()),
                Line::Notice("Stored on IPFS as QmClip".to_string()),
            ]
        );
        assert_eq!(clipboard_text(&created()), Some("IABLO"));
    }

    #[test]
    fn resolved_clip_prints_url() {
        let outcome = ClipOutcome::Success(ClipSuccess::Resolved {
            code: ClipCode::parse("abcd1").unwrap(),
            url: "https://example.com".to_string(),
        });

        assert_eq!(render(&outcome), vec![Line::Result("https://example.com".to_string())]);
        assert_eq!(clipboard_text(&outcome), Some("https://example.com"));
    }

    #[test]
    fn cancelled_is_a_notice_not_an_error() {
        assert_eq!(render(&ClipOutcome::Cancelled), vec![Line::Notice(DENIED_NOTICE.to_string())]);
        assert!(is_ok(&ClipOutcome::Cancelled));
        assert_eq!(clipboard_text(&ClipOutcome::Cancelled), None);
    }

    #[test]
    fn only_results_are_written_to_output() {
        let mut out = Vec::new();

        print(&render(&created()), &mut out).unwrap();
        print(&render(&ClipOutcome::Cancelled), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "IABLO\n");
    }

    #[test]
    fn failure_uses_user_facing_message() {
        let outcome = ClipOutcome::Failure(ClipFailure::CodeNotFound);

        assert_eq!(
            render(&outcome),
            vec![Line::Error("Error: No clip is registered under this code".to_string())]
        );
        assert!(!is_ok(&outcome));
    }
}
