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

//! The parsed model: rows, unique keys and the key lookup table.

use crate::error::{DecodeError, DecodeResult};
use crate::options::{DecodeOptions, DuplicateKeys};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A raw value as stored for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawValue {
    /// The whole rest of the line.
    Scalar(String),
    /// Whitespace-separated tokens (only produced by `ValueSplit::Whitespace`).
    List(Vec<String>),
}

impl RawValue {
    /// True for an empty scalar or a list without tokens.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// The value as text; list tokens are joined with a single space.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Scalar(s) => Cow::Borrowed(s.as_str()),
            Self::List(items) => Cow::Owned(items.join(" ")),
        }
    }

    /// Get as scalar if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Get as list if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

/// One non-comment, non-blank line of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// First whitespace-delimited token.
    pub key: String,
    /// Rest of the line, trimmed. Empty for key-only lines.
    pub value: String,
    /// Line number (1-based).
    pub line: usize,
}

/// In-memory result of parsing one configuration text.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedModel {
    rows: Vec<Row>,
    keys: Vec<String>,
    values: BTreeMap<String, RawValue>,
    #[cfg_attr(feature = "serde", serde(skip))]
    options: DecodeOptions,
}

impl ParsedModel {
    /// Create an empty model that will bind with the given options.
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            rows: Vec::new(),
            keys: Vec::new(),
            values: BTreeMap::new(),
            options,
        }
    }

    /// All rows in file order, duplicates included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Unique keys in first-occurrence order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Look up the stored value for a key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    /// Look up a key and return its value as text.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.values.get(key).map(RawValue::text)
    }

    /// Check whether a key was declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of unique keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when the input declared no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate `(key, value)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.keys
            .iter()
            .filter_map(move |k| self.values.get(k).map(|v| (k.as_str(), v)))
    }

    /// Options used by [`ParsedModel::bind`].
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Mutable access to the bind options, e.g. to switch the nested mode
    /// after parsing.
    pub fn options_mut(&mut self) -> &mut DecodeOptions {
        &mut self.options
    }

    /// Record one parsed line according to the duplicate-key policy.
    pub(crate) fn push(
        &mut self,
        key: &str,
        text: &str,
        value: RawValue,
        line: usize,
    ) -> DecodeResult<()> {
        match self.values.get_mut(key) {
            Some(existing) => {
                if self.options.duplicate_keys == DuplicateKeys::Reject {
                    return Err(DecodeError::duplicate_key(key, line));
                }
                if !value.is_empty() {
                    *existing = value;
                }
            }
            None => {
                self.keys.push(key.to_string());
                self.values.insert(key.to_string(), value);
            }
        }
        self.rows.push(Row {
            key: key.to_string(),
            value: text.to_string(),
            line,
        });
        Ok(())
    }
}
