//! Interactive console helpers.

use std::io::{self, BufRead, Write};

use haat_app::{errors::ApiError, session::SessionStore};

/// Ask the user to confirm an irreversible action. Defaults to no.
pub fn confirm(question: &str) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Read one line of input after printing a prompt.
pub fn read_line(prompt: &str) -> io::Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;

    if read == 0 {
        // EOF behaves like quitting.
        return Ok("quit".to_string());
    }

    Ok(line.trim().to_string())
}

/// Turn an API failure into the message shown to the user.
///
/// An auth failure is the one case that tears the session down: both
/// session keys are cleared before reporting.
pub fn api_failure(session: &SessionStore, error: &ApiError) -> String {
    if error.is_auth() {
        if let Err(clear_error) = session.clear() {
            tracing::warn!(%clear_error, "failed to clear session");
        }

        return format!("{error}");
    }

    if error.is_retryable() {
        return format!("{error} (you can retry)");
    }

    format!("{error}")
}
