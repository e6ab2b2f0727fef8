//! System clipboard access through the platform's copy utility.

use crate::types::GeneratedPost;
use crate::Error;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Copy utilities to try, in order, for the current OS: program and arguments.
fn candidates() -> &'static [(&'static str, &'static str)] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", "")]
    } else if cfg!(target_os = "windows") {
        &[("clip", "")]
    } else {
        &[
            ("wl-copy", ""),
            ("xclip", "-selection clipboard"),
            ("xsel", "--clipboard --input"),
        ]
    }
}

/// Copy `text` to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), Error> {
    let mut last_error = None;
    for (program, args) in candidates() {
        match pipe_into(program, args, text) {
            Ok(()) => {
                debug!(program, "copied to clipboard");
                return Ok(());
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or_else(|| Error::clipboard("no clipboard utility for this platform")))
}

/// Copy a post as its title, a blank line, then the body.
pub fn copy_post(post: &GeneratedPost) -> Result<(), Error> {
    copy_to_clipboard(&post.clipboard_text())
}

fn pipe_into(program: &str, args: &str, text: &str) -> Result<(), Error> {
    let mut child = Command::new(program)
        .args(args.split_whitespace())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::clipboard(format!("failed to run {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            // Reap the child before the caller moves on to the next utility.
            drop(stdin);
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::clipboard(format!("failed to write to {program}: {e}")));
        }
    }

    let status = child
        .wait()
        .map_err(|e| Error::clipboard(format!("failed to wait for {program}: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::clipboard(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_text_layout() {
        let post = GeneratedPost::new("Headline", "Body line one\nBody line two");
        assert_eq!(
            post.clipboard_text(),
            "Headline\n\nBody line one\nBody line two"
        );
    }

    #[test]
    fn test_missing_program_is_clipboard_error() {
        let err = pipe_into("postflow-no-such-copy-tool", "", "text").unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_that_ignores_stdin_is_reaped_on_write_failure() {
        // `true` exits without reading, so a large write hits a closed pipe.
        let text = "x".repeat(4 * 1024 * 1024);
        let err = pipe_into("true", "", &text).unwrap_err();
        match err {
            Error::Clipboard(message) => assert!(message.contains("failed to write to true")),
            other => panic!("Expected clipboard error, got {other:?}"),
        }
    }
}
