/// Error types for .tri decoding, encoding and configuration
use std::fmt;

use thiserror::Error;

/// What went wrong while decoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatErrorKind {
    /// Stream ended in the middle of a field
    Truncated,
    /// Leading 4 bytes are not the .tri magic
    BadMagic(u32),
    /// Marker float matches neither sentinel
    UnexpectedMarker(f32),
    NegativeTriangleCount(i32),
    TriangleCountTooLarge { count: i32, max: u32 },
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::Truncated => write!(f, "unexpected end of file"),
            FormatErrorKind::BadMagic(magic) => write!(
                f,
                "bad magic 0x{:08X} (expected 0x{:08X})",
                magic,
                crate::format::TRI_MAGIC
            ),
            FormatErrorKind::UnexpectedMarker(value) => {
                write!(f, "unexpected marker {} (0x{:08X})", value, value.to_bits())
            }
            FormatErrorKind::NegativeTriangleCount(count) => {
                write!(f, "negative triangle count {}", count)
            }
            FormatErrorKind::TriangleCountTooLarge { count, max } => {
                write!(f, "triangle count {} exceeds limit {}", count, max)
            }
        }
    }
}

/// A decode failure and the byte offset where it was detected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{kind} at byte {offset}")]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub offset: usize,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Debug, Error)]
pub enum TriError {
    #[error("malformed .tri data: {0}")]
    Format(#[from] FormatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TriError {
    /// The format error kind, if this is a decode failure
    pub fn format_kind(&self) -> Option<FormatErrorKind> {
        match self {
            TriError::Format(e) => Some(e.kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TriError>;
