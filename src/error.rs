#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the contribution pipeline."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by the contribution pipeline and CLI.
///
/// The remote-source variants ([`Error::Transport`] and
/// [`Error::MalformedResponse`]) never escape the resolution boundary in
/// `source`; they exist so the fallback policy has a precise taxonomy to
/// match on. The remaining variants surface from the CLI layer.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Network failure or non-success status from the remote endpoint.
    #[error("transport error: {message}")]
    Transport {
        /// Human readable message describing the transport failure.
        message: String
    },
    /// The remote endpoint answered, but the contribution calendar was
    /// missing or structurally unexpected.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Human readable message describing what was missing or unexpected.
        message: String
    },
    /// Returned when inputs violate invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps serialization errors when writing rendering instructions.
    #[error("failed to serialize output: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Wraps I/O errors that occur while writing output artifacts.
    #[error("failed to write output at {path:?}: {source}")]
    Io {
        /// Location of the artifact being produced.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a transport error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the transport failure.
    pub fn transport<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Transport {
            message: message.into()
        }
    }

    /// Constructs a malformed-response error from the provided displayable
    /// value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the structural problem.
    pub fn malformed<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::MalformedResponse {
            message: message.into()
        }
    }

    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<masterror::AppError> for Error {
    fn from(error: masterror::AppError) -> Self {
        Self::Transport {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the output artifact that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn transport_constructor_populates_message() {
        let error = Error::transport("connection refused");
        match error {
            Error::Transport {
                ref message
            } => {
                assert_eq!(message, "connection refused");
            }
            other => panic!("expected transport error, got {other:?}")
        }
    }

    #[test]
    fn malformed_constructor_populates_message() {
        let error = Error::malformed("no contribution calendar in response");
        match error {
            Error::MalformedResponse {
                ref message
            } => {
                assert_eq!(message, "no contribution calendar in response");
            }
            other => panic!("expected malformed-response error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::validation("display me");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/heatmap.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }

    #[test]
    fn app_error_conversion_maps_to_transport_variant() {
        let app_error = masterror::AppError::service("upstream unavailable");
        let mapped: Error = app_error.into();
        assert!(matches!(mapped, Error::Transport { .. }));
    }
}
