//! Error types for CV generation

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a CV.
///
/// Extraction never fails: missing structure degrades to defaults. Only the
/// display sequence produces errors, and those are caught at the generator
/// boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// The display surface could not be opened, written, finalized or focused
    #[error("Display surface error: {0}")]
    SurfaceError(String),

    /// Underlying I/O failure (file or stdout surfaces, reading input).
    /// The OS detail is carried as the source.
    #[error("I/O error")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Format an error followed by its source chain, `a: b: c`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_detail_in_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(error_chain(&err), "I/O error: denied");
    }

    #[test]
    fn io_detail_appears_once_in_anyhow_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = anyhow::Error::new(Error::from(io)).context("failed to read cv.html");
        let shown = format!("{:#}", err);
        assert_eq!(shown, "failed to read cv.html: I/O error: No such file");
        assert_eq!(shown.matches("No such file").count(), 1);
    }

    #[test]
    fn surface_error_message() {
        let err = Error::SurfaceError("popup blocked".into());
        assert_eq!(err.to_string(), "Display surface error: popup blocked");
        assert_eq!(error_chain(&err), "Display surface error: popup blocked");
    }
}
