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

//! Input preprocessing: BOM skipping and line splitting.

/// Preprocessed input ready for parsing.
/// Stores the text once and the byte range of every line.
#[derive(Debug)]
pub struct PreprocessedInput<'a> {
    text: &'a str,
    /// Line boundaries: (line_number, start_offset, end_offset)
    line_offsets: Vec<(usize, usize, usize)>,
}

impl<'a> PreprocessedInput<'a> {
    /// Get lines as (line_num, &str) iterator - zero allocation
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        let text = self.text;
        self.line_offsets
            .iter()
            .map(move |&(num, start, end)| (num, &text[start..end]))
    }

    /// Number of physical lines, including blank ones.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }
}

/// Split raw text into numbered lines.
///
/// This handles:
/// - BOM skipping
/// - CRLF line endings (the `\r` before `\n` is dropped)
///
/// There is no failure path: every byte sequence yields some set of lines.
pub fn preprocess(input: &str) -> PreprocessedInput<'_> {
    let text = input.strip_prefix('\u{FEFF}').unwrap_or(input);
    let bytes = text.as_bytes();

    let estimated_lines = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
    let mut line_offsets = Vec::with_capacity(estimated_lines);

    let mut start = 0;
    let mut line_num = 1;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'\n' {
            let end = if i > start && bytes[i - 1] == b'\r' { i - 1 } else { i };
            line_offsets.push((line_num, start, end));
            start = i + 1;
            line_num += 1;
        }
    }

    // Last line (no trailing newline)
    if start < bytes.len() {
        let end = if bytes[bytes.len() - 1] == b'\r' {
            bytes.len() - 1
        } else {
            bytes.len()
        };
        line_offsets.push((line_num, start, end));
    }

    PreprocessedInput { text, line_offsets }
}

/// Check if a line is blank (empty or whitespace only).
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Check if a line is a comment.
///
/// Only a `#` in the very first column counts; an indented `#` starts an
/// ordinary key.
pub fn is_comment_line(line: &str) -> bool {
    line.starts_with('#')
}
