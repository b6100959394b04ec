//! Core error types for diagram generation
//!
//! This module defines the error taxonomy used throughout the generation
//! pipeline, from reading declaration facts to producing transport artifacts.

use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Extraction failure in '{unit}': {message}")]
    ExtractionFailure { unit: String, message: String },

    #[error("Unknown output format: {format}")]
    UnknownOutputFormat { format: String },

    #[error("Transport failure: {message}")]
    TransportFailure { message: String },

    #[error("Fact format error: {source}")]
    FactFormat {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new extraction failure for the named unit
    pub fn extraction_failure(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown output format error
    pub fn unknown_output_format(format: impl Into<String>) -> Self {
        Self::UnknownOutputFormat {
            format: format.into(),
        }
    }

    /// Create a new transport failure
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
        }
    }

    /// Whether this error ends the run rather than a single unit
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ExtractionFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failure() {
        let error = DiagramError::extraction_failure("Orders.cs", "object without a name");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Extraction failure"));
        assert!(error_msg.contains("Orders.cs"));
        assert!(error_msg.contains("object without a name"));
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_unknown_output_format() {
        let error = DiagramError::unknown_output_format("svg");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown output format"));
        assert!(error_msg.contains("svg"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_transport_failure() {
        let error = DiagramError::transport_failure("status 503");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Transport failure"));
        assert!(error_msg.contains("503"));
    }

    #[test]
    fn test_fact_format_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DiagramError = json_err.into();
        assert!(format!("{}", error).contains("Fact format error"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
