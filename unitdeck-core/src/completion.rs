//! Completion events delivered back into the session once an external
//! invocation has finished.

use thiserror::Error;

/// Separator placed between captured stdout and stderr
pub const STDERR_SEPARATOR: &str = "\n--- STDERR ---\n";

/// Separator placed between command output and the execution error
pub const ERROR_SEPARATOR: &str = "\n--- ERROR ---\n";

/// Failure of the external tool itself (start failure or non-zero exit).
///
/// Carries owned strings so it can travel inside events.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExternalToolError {
    #[error("failed to execute {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("{program} exited with status {code}")]
    ExitStatus { program: String, code: i32 },
    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}

/// Result of one external invocation: the combined text plus any error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionEvent {
    pub text: String,
    pub err: Option<ExternalToolError>,
}

impl CompletionEvent {
    pub fn new(text: impl Into<String>, err: Option<ExternalToolError>) -> Self {
        Self {
            text: text.into(),
            err,
        }
    }

    /// Build the event from captured streams.
    ///
    /// stderr is appended after stdout, separated only when both are present.
    pub fn from_streams(stdout: &str, stderr: &str, err: Option<ExternalToolError>) -> Self {
        Self {
            text: combine_streams(stdout, stderr),
            err,
        }
    }

    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }

    /// Text for the output view: the combined output, then the error detail.
    pub fn display_text(&self) -> String {
        match &self.err {
            Some(err) => format!("{}{}{}", self.text, ERROR_SEPARATOR, err),
            None => self.text.clone(),
        }
    }
}

pub fn combine_streams(stdout: &str, stderr: &str) -> String {
    let mut out = stdout.to_string();
    if !stderr.is_empty() {
        if !out.is_empty() {
            out.push_str(STDERR_SEPARATOR);
        }
        out.push_str(stderr);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_streams() {
        assert_eq!(combine_streams("out", ""), "out");
        assert_eq!(combine_streams("", "err"), "err");
        assert_eq!(combine_streams("out", "err"), "out\n--- STDERR ---\nerr");
        assert_eq!(combine_streams("", ""), "");
    }

    #[test]
    fn test_display_text_with_error() {
        let ev = CompletionEvent::from_streams(
            "",
            "Unit foo.service not found.\n",
            Some(ExternalToolError::ExitStatus {
                program: "systemctl".into(),
                code: 5,
            }),
        );
        assert!(!ev.is_success());
        assert_eq!(
            ev.display_text(),
            "Unit foo.service not found.\n\n--- ERROR ---\nsystemctl exited with status 5"
        );
    }

    #[test]
    fn test_display_text_success() {
        let ev = CompletionEvent::new("systemd 255\n", None);
        assert!(ev.is_success());
        assert_eq!(ev.display_text(), "systemd 255\n");
    }

    #[test]
    fn test_spawn_error_message() {
        let err = ExternalToolError::Spawn {
            program: "nope".into(),
            message: "No such file or directory (os error 2)".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to execute nope: No such file or directory (os error 2)"
        );
    }
}
