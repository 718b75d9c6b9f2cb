//! Error types for apiref-core

use std::fmt;
use thiserror::Error;

/// Reference build error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An expected module file is absent
    ModuleMissing,
    /// Module source is not syntactically valid Python
    Parse,
    /// A default-value expression could not be rendered back to text
    Render,
    /// I/O errors
    IO,
    /// Serialization errors
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ModuleMissing => "module_missing",
            ErrorKind::Parse => "parse",
            ErrorKind::Render => "render",
            ErrorKind::IO => "io",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference build error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct ApirefError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ApirefError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn module_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModuleMissing, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl From<std::io::Error> for ApirefError {
    fn from(err: std::io::Error) -> Self {
        ApirefError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for ApirefError {
    fn from(err: serde_json::Error) -> Self {
        ApirefError::new(ErrorKind::Serialization, format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApirefError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = ApirefError::module_missing("tsdecomp/core.py not found");
        let msg = format!("{}", err);
        assert_eq!(msg, "[module_missing] tsdecomp/core.py not found");
    }

    #[test]
    fn test_parse_error() {
        let err = ApirefError::parse("unexpected token");
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.message, "unexpected token");
        assert!(err.source.is_none());
    }

    #[test]
    fn test_with_source() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ApirefError::io("module file unreadable").with_source(io_err);

        assert_eq!(err.kind, ErrorKind::IO);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
            .err()
            .unwrap();
        let err: ApirefError = json_err.into();

        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(err.message.contains("JSON error"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::ModuleMissing.as_str(), "module_missing");
        assert_eq!(ErrorKind::Parse.as_str(), "parse");
        assert_eq!(ErrorKind::Render.as_str(), "render");
        assert_eq!(ErrorKind::IO.as_str(), "io");
        assert_eq!(ErrorKind::Serialization.as_str(), "serialization");
    }

    #[test]
    fn test_result_propagation() {
        fn inner() -> Result<()> {
            Err(ApirefError::parse("bad source"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
