//! Error types for the typed INI bridge.
//!
//! The codec itself never fails: [`crate::decode`] skips lines it cannot
//! understand and [`crate::encode`] accepts any [`crate::IniMap`]. Errors only
//! appear when converting between INI data and Rust types through serde, or when
//! reading from / writing to an I/O stream.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: a decoded value cannot become the requested Rust type
//! - **Invalid Values**: a string could not be parsed as the requested number or bool
//! - **Unsupported Types**: the Rust value has no INI representation
//! - **I/O Errors**: reading or writing failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{from_str, Error};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug)]
//! struct Server { port: u16 }
//!
//! let result: Result<Server, Error> = from_str("port=not-a-number");
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors of the typed serialization layer.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Type mismatch during deserialization
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A string value that could not be parsed as the requested scalar
    #[error("Invalid value {value:?}: expected {expected}")]
    InvalidValue { value: String, expected: String },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error when deserialization fails due to incompatible types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::type_mismatch("sequence", "section");
    /// assert!(err.to_string().contains("expected sequence"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an error for a string that does not parse as the expected scalar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::invalid_value("abc", "u16");
    /// assert!(err.to_string().contains("\"abc\""));
    /// ```
    pub fn invalid_value(value: &str, expected: &str) -> Self {
        Error::InvalidValue {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot be written as INI.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
