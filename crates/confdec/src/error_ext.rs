// Dweve Confdec - Line-Oriented Configuration Decoder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error context helpers.
//!
//! Extension methods for annotating decode errors as they propagate:
//!
//! ```rust
//! use confdec::{decode_str, DecodeOptions, DecodeResultExt, Record};
//!
//! #[derive(Record, Default)]
//! struct Limits {
//!     workers: u8,
//! }
//!
//! let mut limits = Limits::default();
//! let err = decode_str("workers 999\n", &mut limits, &DecodeOptions::default())
//!     .context("while loading worker limits")
//!     .unwrap_err();
//!
//! let ctx = err.context.unwrap();
//! assert!(ctx.starts_with("while loading worker limits"));
//! assert!(ctx.contains("in record Limits"));
//! ```

use crate::{DecodeError, DecodeErrorKind};
use std::fmt;

/// Extension trait for adding context to results that end in a [`DecodeError`].
///
/// - `context()`: immediate evaluation, for plain strings
/// - `with_context()`: lazy evaluation, only formats on the error path
/// - `map_err_to_decode()`: conversion for foreign error types
pub trait DecodeResultExt<T> {
    /// The error type of the wrapped result.
    type ErrorType;

    /// Add context to an error.
    ///
    /// New context is prepended to any existing context, separated by `; `.
    fn context<C>(self, context: C) -> Result<T, DecodeError>
    where
        C: fmt::Display;

    /// Add context computed by a closure, only when an error occurs.
    fn with_context<C, F>(self, f: F) -> Result<T, DecodeError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Convert a foreign error into a `DecodeError`.
    ///
    /// ```rust
    /// use confdec::{DecodeError, DecodeResultExt};
    ///
    /// fn read(path: &str) -> Result<String, DecodeError> {
    ///     std::fs::read_to_string(path)
    ///         .map_err_to_decode(|e| DecodeError::file_read(format!("{}: {}", path, e)))
    /// }
    ///
    /// assert!(read("/definitely/not/here.conf").is_err());
    /// ```
    fn map_err_to_decode<F>(self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(Self::ErrorType) -> DecodeError;
}

impl<T> DecodeResultExt<T> for Result<T, DecodeError> {
    type ErrorType = DecodeError;

    fn context<C>(self, context: C) -> Result<T, DecodeError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, DecodeError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }

    fn map_err_to_decode<F>(self, _f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(Self::ErrorType) -> DecodeError,
    {
        // Already a DecodeError.
        self
    }
}

impl<T> DecodeResultExt<T> for Result<T, std::io::Error> {
    type ErrorType = std::io::Error;

    fn context<C>(self, context: C) -> Result<T, DecodeError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| io_error(e).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, DecodeError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| io_error(e).with_context(f().to_string()))
    }

    fn map_err_to_decode<F>(self, f: F) -> Result<T, DecodeError>
    where
        F: FnOnce(Self::ErrorType) -> DecodeError,
    {
        self.map_err(f)
    }
}

fn io_error(e: std::io::Error) -> DecodeError {
    let mut err = DecodeError::new(DecodeErrorKind::FileRead, e.to_string());
    err.io_kind = Some(e.kind());
    err
}

fn add_context_to_error(error: DecodeError, new_context: String) -> DecodeError {
    if new_context.is_empty() {
        return error;
    }

    let combined = match &error.context {
        // Format: "new context; existing context"
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    };
    error.with_context(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_on_error() {
        let result: Result<(), DecodeError> = Err(DecodeError::overflow("age", "300", "u8"));
        let err = result.context("in function load").unwrap_err();

        assert_eq!(err.context.as_deref(), Some("in function load"));
        assert_eq!(err.kind, DecodeErrorKind::Overflow);
    }

    #[test]
    fn test_context_on_ok() {
        let result: Result<i32, DecodeError> = Ok(42);
        assert_eq!(result.context("unused").unwrap(), 42);
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<(), DecodeError> = Err(DecodeError::duplicate_key("dup", 2));
        let err = result
            .context("in section users")
            .context("while loading config")
            .unwrap_err();

        assert_eq!(
            err.context.as_deref(),
            Some("while loading config; in section users")
        );
    }

    #[test]
    fn test_with_context_is_lazy() {
        let mut called = false;
        let result: Result<i32, DecodeError> = Ok(1);
        let _ = result.with_context(|| {
            called = true;
            "never"
        });
        assert!(!called);
    }

    #[test]
    fn test_empty_context_ignored() {
        let result: Result<(), DecodeError> = Err(DecodeError::invalid_target("none"));
        let err = result.context("").unwrap_err();
        assert!(err.context.is_none());
    }

    #[test]
    fn test_io_error_context() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("reading app.conf").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::FileRead);
        assert_eq!(err.io_kind, Some(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.context.as_deref(), Some("reading app.conf"));
    }

    #[test]
    fn test_map_err_to_decode() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = result
            .map_err_to_decode(|e| DecodeError::file_read(format!("custom: {}", e)))
            .unwrap_err();
        assert_eq!(err.message, "custom: boom");
    }
}
