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

//! Line parser for configuration text.
//!
//! # Grammar
//!
//! ```text
//! # full-line comment (only in the first column)
//! key value that runs to the end of the line
//! keyonly
//! ```
//!
//! The key is the first whitespace-delimited token of the trimmed line and
//! the value is everything after it, trimmed. Blank lines are ignored.
//! There is no quoting, escaping or continuation.
//!
//! With the default options parsing never fails; the only error the parser
//! itself can produce is `DuplicateKey` under [`DuplicateKeys::Reject`].
//!
//! [`DuplicateKeys::Reject`]: crate::DuplicateKeys::Reject

use crate::error::DecodeResult;
use crate::limits::read_source;
use crate::model::{ParsedModel, RawValue};
use crate::options::{DecodeOptions, ValueSplit};
use crate::preprocess::{is_blank_line, is_comment_line, preprocess};
use std::path::Path;
use tracing::debug;

/// Parse configuration text with default options.
pub fn parse(input: &str) -> ParsedModel {
    // Overwrite policy cannot fail.
    parse_str(input, &DecodeOptions::default()).unwrap_or_default()
}

/// Parse configuration text with custom options.
pub fn parse_str(input: &str, options: &DecodeOptions) -> DecodeResult<ParsedModel> {
    let preprocessed = preprocess(input);
    let mut model = ParsedModel::new(options.clone());

    for (line_num, line) in preprocessed.lines() {
        if is_comment_line(line) || is_blank_line(line) {
            continue;
        }
        let (key, rest) = split_key(line);
        let value = match options.value_split {
            ValueSplit::Rest => RawValue::Scalar(rest.to_string()),
            ValueSplit::Whitespace => split_whitespace_value(rest),
        };
        model.push(key, rest, value, line_num)?;
    }

    debug!(
        lines = preprocessed.line_count(),
        rows = model.rows().len(),
        keys = model.keys().len(),
        "parsed configuration"
    );
    Ok(model)
}

/// Read and parse a configuration file.
///
/// Only reading can fail under the default options; see [`parse_str`].
pub fn parse_file_with(path: &Path, options: &DecodeOptions) -> DecodeResult<ParsedModel> {
    let text = read_source(path, &options.limits)?;
    debug!(path = %path.display(), bytes = text.len(), "read configuration file");
    parse_str(&text, options)
}

/// Split a non-blank line into key and trimmed rest.
fn split_key(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.find(char::is_whitespace) {
        Some(pos) => (&trimmed[..pos], trimmed[pos..].trim()),
        None => (trimmed, ""),
    }
}

fn split_whitespace_value(rest: &str) -> RawValue {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() > 1 {
        RawValue::List(tokens.into_iter().map(str::to_string).collect())
    } else {
        RawValue::Scalar(rest.to_string())
    }
}
