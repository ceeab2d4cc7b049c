use std::fmt;

/// The main error type for the errdiffuse crate
#[derive(Debug)]
pub enum DitherError {
    /// A pixel coordinate fell outside the buffer extent
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },

    /// Width, height or channel count is zero, or a 3D buffer is ragged
    InvalidDimensions {
        width: usize,
        height: usize,
        planes: usize,
    },

    /// A channel vector does not have the buffer's channel count
    ChannelCountMismatch { expected: usize, actual: usize },

    /// A flat buffer does not hold exactly width * height * planes values
    BufferLength { expected: usize, actual: usize },

    /// Error occurred while reading or decoding an image
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    Io(std::io::Error),

    /// Configuration could not be parsed
    Config(String),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Pixel ({}, {}) is out of bounds for a {}x{} buffer",
                x, y, width, height
            ),
            DitherError::InvalidDimensions {
                width,
                height,
                planes,
            } => write!(
                f,
                "Invalid buffer dimensions: {}x{} with {} channels per pixel",
                width, height, planes
            ),
            DitherError::ChannelCountMismatch { expected, actual } => write!(
                f,
                "Channel count mismatch: expected {}, got {}",
                expected, actual
            ),
            DitherError::BufferLength { expected, actual } => write!(
                f,
                "Buffer length mismatch: expected {} values, got {}",
                expected, actual
            ),
            DitherError::ImageDecode(e) => write!(f, "Image decode error: {}", e),
            DitherError::ImageEncode(e) => write!(f, "Image encode error: {}", e),
            DitherError::Io(e) => write!(f, "I/O error: {}", e),
            DitherError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::ImageDecode(e) | DitherError::ImageEncode(e) => Some(e),
            DitherError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// From implementations for automatic conversion from common error types

impl From<image::ImageError> for DitherError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => DitherError::ImageEncode(err),
            _ => DitherError::ImageDecode(err),
        }
    }
}

impl From<std::io::Error> for DitherError {
    fn from(err: std::io::Error) -> Self {
        DitherError::Io(err)
    }
}

impl From<json::Error> for DitherError {
    fn from(err: json::Error) -> Self {
        DitherError::Config(err.to_string())
    }
}

// Convenience type alias for Results using DitherError
pub type Result<T = ()> = std::result::Result<T, DitherError>;
