// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Binding(BindingError),
}

/// Reasons a magnifier cannot bind to a surface.
///
/// All variants are recoverable: the host retries `attach` once the
/// surface has been laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The surface has not been laid out yet or holds an empty image.
    ZeroSize { width: f32, height: f32 },

    /// The display-to-source scale factor is zero, negative or not finite.
    InvalidScale(f32),

    /// The surface handle could not be read (dropped or poisoned).
    Unavailable,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::ZeroSize { width, height } => {
                write!(f, "surface has zero size ({}x{})", width, height)
            }
            BindingError::InvalidScale(scale) => write!(f, "invalid surface scale: {}", scale),
            BindingError::Unavailable => write!(f, "surface is unavailable"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Binding(e) => write!(f, "Binding Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<BindingError> for Error {
    fn from(err: BindingError) -> Self {
        Error::Binding(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn binding_error_wraps_into_error() {
        let err: Error = BindingError::ZeroSize {
            width: 0.0,
            height: 600.0,
        }
        .into();
        assert_eq!(
            format!("{}", err),
            "Binding Error: surface has zero size (0x600)"
        );
    }

    #[test]
    fn binding_error_display_mentions_scale() {
        let err = BindingError::InvalidScale(-1.0);
        assert!(format!("{}", err).contains("-1"));
    }
}
