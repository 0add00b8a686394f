//! Error types for the gtest-report library.

use std::io;
use thiserror::Error;

/// Result type alias for gtest-report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, summarizing or rendering a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The XML is well formed but is not a gtest report.
    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// A report value could not be interpreted.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A percentage vector that does not describe a distribution over 100.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
