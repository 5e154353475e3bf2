use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    /// Shape or image dimensions that can not be rasterized
    InvalidGeometry { reason: String },
    /// Pixel data length does not match `width * height * 4`
    BufferMismatch { expected: usize, actual: usize },
    /// Failed to compress or write icon data
    Io {
        path: Option<PathBuf>,
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn geometry<S: Into<String>>(reason: S) -> Self {
        Error::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidGeometry { reason } => write!(f, "invalid geometry: {}", reason),
            Error::BufferMismatch { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            Error::Io {
                path: Some(path),
                source,
            } => write!(f, "{}: {}", path.display(), source),
            Error::Io { path: None, source } => fmt::Display::fmt(source, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io { source, .. } => source,
            error => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}
