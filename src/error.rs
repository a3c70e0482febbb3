//! Error types for sidedoc
//!
//! Extraction fails in exactly two ways: the package cannot be parsed, or an
//! embedded image cannot be decoded. Neither is recovered from; the caller
//! sees the whole document fail.

use std::io;
use thiserror::Error;

/// Result type alias for sidedoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by loading and extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be opened or parsed as a Word document.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An image relationship's blob is not a decodable image.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("Invalid ZIP container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to read document body: {0}")]
    Docx(#[from] docx_rs::ReaderError),

    #[error("Malformed relationship part: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Relationship {id} points at missing part {target}")]
    MissingPart { id: String, target: String },
}

#[derive(Error, Debug)]
#[error("Failed to decode image {relationship_id} ({target}): {source}")]
pub struct DecodeError {
    pub relationship_id: String,
    pub target: String,
    #[source]
    pub source: image::ImageError,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Parse(ParseError::Io(err))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Parse(ParseError::Zip(err))
    }
}

impl From<docx_rs::ReaderError> for Error {
    fn from(err: docx_rs::ReaderError) -> Self {
        Error::Parse(ParseError::Docx(err))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Parse(ParseError::Xml(err))
    }
}
