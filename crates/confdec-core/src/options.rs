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

//! Per-call options for parsing and binding.
//!
//! Every knob lives on [`DecodeOptions`]; nothing is process-wide, so two
//! decodes with different delimiters can run side by side.
//!
//! ```
//! use confdec_core::{DecodeOptions, DuplicateKeys, NestedMode};
//!
//! let opts = DecodeOptions::builder()
//!     .nested_mode(NestedMode::SingleRow)
//!     .field_delimiter(";")
//!     .duplicate_keys(DuplicateKeys::Reject)
//!     .build();
//!
//! assert_eq!(opts.nested_mode, NestedMode::SingleRow);
//! assert_eq!(opts.sequence_delimiter, ",");
//! ```

use crate::limits::Limits;

/// How fields of a nested record are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedMode {
    /// Each nested field is matched against top-level keys on its own,
    /// as if the nested record were flattened into its parent.
    #[default]
    Flatten,
    /// One row named after the nested field supplies every nested field
    /// positionally, split by the field delimiter.
    SingleRow,
}

/// What happens when a key is declared on more than one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// A later non-empty value replaces the stored one.
    #[default]
    Overwrite,
    /// Any repeated key is a `DuplicateKey` error.
    Reject,
}

/// How the text after the key is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSplit {
    /// The rest of the line is one scalar value.
    #[default]
    Rest,
    /// The rest of the line is split on whitespace; two or more tokens are
    /// stored as a list.
    Whitespace,
}

/// Options shared by the line parser and the field binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Nested record handling.
    pub nested_mode: NestedMode,
    /// Separator for sequence-kind fields (default: `,`).
    pub sequence_delimiter: String,
    /// Separator for single-row nested records (default: a single space).
    ///
    /// An empty delimiter splits on any whitespace.
    pub field_delimiter: String,
    /// Duplicate-key policy.
    pub duplicate_keys: DuplicateKeys,
    /// Value storage policy.
    pub value_split: ValueSplit,
    /// Limits applied when reading files.
    pub limits: Limits,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            nested_mode: NestedMode::default(),
            sequence_delimiter: ",".to_string(),
            field_delimiter: " ".to_string(),
            duplicate_keys: DuplicateKeys::default(),
            value_split: ValueSplit::default(),
            limits: Limits::default(),
        }
    }
}

impl DecodeOptions {
    /// Create a new builder for DecodeOptions.
    pub fn builder() -> DecodeOptionsBuilder {
        DecodeOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of DecodeOptions.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptionsBuilder {
    options: DecodeOptions,
}

impl DecodeOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nested record mode (default: `Flatten`).
    pub fn nested_mode(mut self, mode: NestedMode) -> Self {
        self.options.nested_mode = mode;
        self
    }

    /// Set the sequence delimiter (default: `,`).
    pub fn sequence_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.sequence_delimiter = delimiter.into();
        self
    }

    /// Set the single-row field delimiter (default: a single space).
    pub fn field_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.field_delimiter = delimiter.into();
        self
    }

    /// Set the duplicate-key policy (default: `Overwrite`).
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.options.duplicate_keys = policy;
        self
    }

    /// Shorthand for `duplicate_keys(DuplicateKeys::Reject)` when `strict` is true.
    pub fn strict(self, strict: bool) -> Self {
        self.duplicate_keys(if strict {
            DuplicateKeys::Reject
        } else {
            DuplicateKeys::Overwrite
        })
    }

    /// Set the value storage policy (default: `Rest`).
    pub fn value_split(mut self, split: ValueSplit) -> Self {
        self.options.value_split = split;
        self
    }

    /// Set the maximum file size in bytes (default: 1GB).
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.options.limits.max_file_size = size;
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Build the options.
    pub fn build(self) -> DecodeOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.nested_mode, NestedMode::Flatten);
        assert_eq!(opts.sequence_delimiter, ",");
        assert_eq!(opts.field_delimiter, " ");
        assert_eq!(opts.duplicate_keys, DuplicateKeys::Overwrite);
        assert_eq!(opts.value_split, ValueSplit::Rest);
        assert_eq!(opts.limits, Limits::default());
    }

    #[test]
    fn test_builder_matches_default() {
        assert_eq!(DecodeOptions::builder().build(), DecodeOptions::default());
    }

    #[test]
    fn test_builder_sets_every_field() {
        let opts = DecodeOptions::builder()
            .nested_mode(NestedMode::SingleRow)
            .sequence_delimiter(";")
            .field_delimiter("|")
            .strict(true)
            .value_split(ValueSplit::Whitespace)
            .max_file_size(64)
            .build();
        assert_eq!(opts.nested_mode, NestedMode::SingleRow);
        assert_eq!(opts.sequence_delimiter, ";");
        assert_eq!(opts.field_delimiter, "|");
        assert_eq!(opts.duplicate_keys, DuplicateKeys::Reject);
        assert_eq!(opts.value_split, ValueSplit::Whitespace);
        assert_eq!(opts.limits.max_file_size, 64);
    }

    #[test]
    fn test_strict_false_restores_overwrite() {
        let opts = DecodeOptions::builder().strict(true).strict(false).build();
        assert_eq!(opts.duplicate_keys, DuplicateKeys::Overwrite);
    }

    #[test]
    fn test_limits_replaced() {
        let opts = DecodeOptions::builder().limits(Limits::unlimited()).build();
        assert_eq!(opts.limits.max_file_size, u64::MAX);
    }
}
