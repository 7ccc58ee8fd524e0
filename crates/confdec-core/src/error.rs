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

//! Error types for parsing and binding.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The configuration file could not be read.
    FileRead,
    /// A decode target is not a present record.
    InvalidTarget,
    /// The same key was declared twice (strict duplicate policy only).
    DuplicateKey,
    /// A single-row nested record received the wrong number of values.
    FieldCountMismatch,
    /// The field's type cannot be bound from text.
    UnsupportedFieldKind,
    /// The value is not valid for the field's type.
    Conversion,
    /// The value is numeric but does not fit the field's integer width.
    Overflow,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead => write!(f, "FileReadError"),
            Self::InvalidTarget => write!(f, "InvalidTargetError"),
            Self::DuplicateKey => write!(f, "DuplicateKeyError"),
            Self::FieldCountMismatch => write!(f, "FieldCountMismatchError"),
            Self::UnsupportedFieldKind => write!(f, "UnsupportedFieldKindError"),
            Self::Conversion => write!(f, "ConversionError"),
            Self::Overflow => write!(f, "OverflowError"),
        }
    }
}

/// An error that occurred while parsing or binding a configuration.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct DecodeError {
    /// The kind of error.
    pub kind: DecodeErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based) for errors tied to an input line.
    pub line: Option<usize>,
    /// Name of the offending field or key.
    pub field: Option<String>,
    /// Additional context (e.g., "while decoding /etc/app.conf").
    pub context: Option<String>,
    /// Underlying I/O error kind for `FileRead` errors.
    pub io_kind: Option<std::io::ErrorKind>,
}

impl DecodeError {
    /// Create a new error.
    pub fn new(kind: DecodeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            field: None,
            context: None,
            io_kind: None,
        }
    }

    /// Add line information.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add the offending field or key name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn file_read(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::FileRead, message)
    }

    /// Wrap an I/O failure, keeping its kind for callers that branch on it.
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        let mut error = Self::file_read(format!("cannot read {}: {}", path.display(), err));
        error.io_kind = Some(err.kind());
        error
    }

    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::InvalidTarget, message)
    }

    pub fn duplicate_key(key: &str, line: usize) -> Self {
        Self::new(
            DecodeErrorKind::DuplicateKey,
            format!("two lines with the same name \"{}\"", key),
        )
        .with_line(line)
        .with_field(key)
    }

    pub fn field_count_mismatch(field: &str, expected: usize, found: usize) -> Self {
        Self::new(
            DecodeErrorKind::FieldCountMismatch,
            format!(
                "field \"{}\" has {} values in file but the record has {} fields",
                field, found, expected
            ),
        )
        .with_field(field)
    }

    pub fn unsupported(field: &str, kind: &str) -> Self {
        Self::new(
            DecodeErrorKind::UnsupportedFieldKind,
            format!("unsupported type {} of field \"{}\"", kind, field),
        )
        .with_field(field)
    }

    pub fn conversion(field: &str, value: &str, kind: &str) -> Self {
        Self::new(
            DecodeErrorKind::Conversion,
            format!("cannot convert value \"{}\" of field \"{}\" to {}", value, field, kind),
        )
        .with_field(field)
    }

    pub fn overflow(field: &str, value: &str, kind: &str) -> Self {
        Self::new(
            DecodeErrorKind::Overflow,
            format!("value {} of field \"{}\" overflows {}", value, field, kind),
        )
        .with_field(field)
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
