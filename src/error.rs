//! Error kinds shared by the codec, the operations, and the session.
//!
//! Everything except [`EditError::Transmission`] is recoverable: the session
//! renders the message and carries on. A transmission failure means the
//! message sink itself is broken, so it is the one error that escalates.
use std::path::PathBuf;

/// Failure raised by the message sink while rendering a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransmissionError {
    /// The message that could not be delivered.
    pub message: String,
    /// Underlying cause reported by the sink.
    pub cause: String,
}

impl std::fmt::Display for TransmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' couldn't be rendered: {}", self.message, self.cause)
    }
}

impl std::error::Error for TransmissionError {}

/// Reasons why loading, transforming, or saving a raster may fail.
#[derive(Clone, Debug, PartialEq)]
pub enum EditError {
    /// A source file could not be opened.
    NotFound { path: PathBuf },
    /// Malformed PPM header or body, or an out-of-range channel.
    Format { reason: String },
    /// Non-integer or out-of-range user argument.
    Parameter { reason: String },
    /// Two rasters (or a raster and its pixel buffer) disagree on size.
    Dimension {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A pixel coordinate outside the raster.
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// Re-encoding between two different compressed formats.
    UnsupportedConversion { from: String, to: String },
    /// Extension missing from the format table.
    UnsupportedFormat { path: PathBuf },
    /// Operation name not recognised by the parser.
    UnknownOperation { name: String },
    /// Reading or writing a file failed after it was opened.
    Io { path: PathBuf, reason: String },
    /// The message sink failed.
    Transmission(TransmissionError),
}

impl EditError {
    pub fn format(reason: impl Into<String>) -> Self {
        EditError::Format {
            reason: reason.into(),
        }
    }

    pub fn parameter(reason: impl Into<String>) -> Self {
        EditError::Parameter {
            reason: reason.into(),
        }
    }

    /// `false` only for failures of the message sink.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EditError::Transmission(_))
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::NotFound { path } => write!(f, "File {} not found!", path.display()),
            EditError::Format { reason } => write!(f, "Invalid PPM file: {reason}"),
            EditError::Parameter { reason } => f.write_str(reason),
            EditError::Dimension { expected, found } => write!(
                f,
                "dimension mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            EditError::OutOfBounds {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "pixel ({row}, {col}) is out of bounds for a {width}x{height} raster"
            ),
            EditError::UnsupportedConversion { from, to } => write!(
                f,
                "converting between non-PPM formats is not supported ({from} -> {to})"
            ),
            EditError::UnsupportedFormat { path } => {
                write!(f, "Image format of {} was not recognized", path.display())
            }
            EditError::UnknownOperation { name } => {
                write!(f, "Could not recognize the command: {name}")
            }
            EditError::Io { path, reason } => {
                write!(f, "Failed to process {}: {reason}", path.display())
            }
            EditError::Transmission(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for EditError {}

impl From<TransmissionError> for EditError {
    fn from(err: TransmissionError) -> Self {
        EditError::Transmission(err)
    }
}
