/*
 * Safecall: Recovers from panics and turns them into ordinary errors.
 * Copyright (C) 2022-2023  Hee Shin
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt::{self, Display};

/// A type alias for the error type used within the crate.
///
/// The `Error` type is a boxed dynamic trait object implementing the
/// `std::error::Error` trait.  Computations wrapped by the safe-call
/// functions return it, and the wrappers hand it back unchanged.  It
/// is `Send` and `Sync` so that results can cross thread boundaries.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Represents the errors this crate creates by itself.
///
/// Errors returned by a wrapped computation are never converted into
/// an `ErrorType`; they pass through as they are.  The variants here
/// cover the two kinds of errors the crate synthesizes, a failed
/// validation and a recovered panic, plus the errors that can occur
/// while loading the configuration.  Callers can tell them apart by
/// downcasting an [`Error`] to `ErrorType`.
#[derive(Debug)]
pub enum ErrorType {
    /// Error carrying the formatted message of a failed validation.
    Validation(String),
    /// Error synthesized from a panic recovered by a safe call.
    Panic {
        /// The textual form of the panic payload.
        payload: String,
        /// The stack trace captured while the panic was in flight.
        backtrace: String,
        /// Where the panic was raised, if known.
        location: Option<String>,
    },
    /// Error indicating a configuration format issue.
    ConfigFormat(String),
    /// Error indicating an illegal state.
    IllegalState(String),
    /// Error indicating an unknown key in the configuration.
    UnknownKey(String),
    /// Error indicating a type error processing S expressions.
    Type(String),
    /// Error wrapping a `std::io::Error` instance.
    Io(std::io::Error),
}

impl ErrorType {
    /// Returns true if the error was synthesized from a recovered
    /// panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, ErrorType::Panic { .. })
    }

    /// Returns the location of the recovered panic, if the error is a
    /// panic error and the location was captured.
    pub fn location(&self) -> Option<&str> {
        match self {
            ErrorType::Panic { location, .. } => location.as_deref(),
            _ => None,
        }
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorType::*;
        match self {
            Validation(message) => write!(f, "{}", message),
            Panic {
                payload, backtrace, ..
            } => write!(f, "panic occurred: {}\nStack trace:\n{}", payload, backtrace),
            ConfigFormat(message) => write!(f, "config format error: {}", message),
            IllegalState(state) => write!(f, "illegal state [{}]", state),
            UnknownKey(key) => write!(f, "the key [{}] is unknown to the config", key),
            Type(expected) => write!(f, "type error (expected: {})", expected),
            Io(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for ErrorType {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ErrorType::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ErrorType {
    fn from(value: std::io::Error) -> Self {
        ErrorType::Io(value)
    }
}

/// Creates a new validation_error.
pub(crate) fn validation_error(message: String) -> Error {
    Box::new(ErrorType::Validation(message))
}

/// Creates a new panic_error.
pub(crate) fn panic_error(payload: String, backtrace: String, location: Option<String>) -> Error {
    Box::new(ErrorType::Panic {
        payload,
        backtrace,
        location,
    })
}

/// Creates a new config_format_error.
pub(crate) fn config_format_error(message: &str) -> Error {
    Box::new(ErrorType::ConfigFormat(message.to_owned()))
}

/// Creates a new illegal_state_error.
pub(crate) fn illegal_state_error(state: &str) -> Error {
    Box::new(ErrorType::IllegalState(state.to_owned()))
}

/// Creates a new unknown_key_error.
pub(crate) fn unknown_key_error(key: &str) -> Error {
    Box::new(ErrorType::UnknownKey(key.to_owned()))
}

/// Creates a new type_error.
pub(crate) fn type_error(expected: &str) -> Error {
    Box::new(ErrorType::Type(expected.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_error_text_embeds_payload_and_trace() {
        let error = panic_error("boom".to_owned(), "frame 0".to_owned(), None);
        assert_eq!(error.to_string(), "panic occurred: boom\nStack trace:\nframe 0");
    }

    #[test]
    fn validation_error_text_is_verbatim() {
        let error = validation_error("x:y".to_owned());
        assert_eq!(error.to_string(), "x:y");
        let error = error.downcast::<ErrorType>().unwrap();
        assert!(!error.is_panic());
        assert_eq!(error.location(), None);
    }

    #[test]
    fn panic_location_is_reachable() {
        let error = panic_error("boom".to_owned(), String::new(), Some("src/a.rs:1:2".to_owned()));
        let error = error.downcast::<ErrorType>().unwrap();
        assert!(error.is_panic());
        assert_eq!(error.location(), Some("src/a.rs:1:2"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error as _;
        let error = ErrorType::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(error.to_string(), "gone");
        assert!(error.source().is_some());
    }
}
