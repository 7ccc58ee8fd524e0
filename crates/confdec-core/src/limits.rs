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

//! Resource limits for reading configuration files.

use crate::error::{DecodeError, DecodeResult};
use std::path::Path;

/// Configurable limits applied before a file is parsed.
///
/// Parsing in-memory text is total; limits only bound how much is read
/// from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum file size in bytes (default: 1GB).
    pub max_file_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024 * 1024, // 1GB
        }
    }
}

impl Limits {
    /// Create limits with no restrictions.
    pub fn unlimited() -> Self {
        Self {
            max_file_size: u64::MAX,
        }
    }
}

/// Read a configuration file into memory.
///
/// Invalid UTF-8 sequences are replaced rather than rejected so that parsing
/// stays total over whatever the file contains.
pub fn read_source(path: &Path, limits: &Limits) -> DecodeResult<String> {
    let metadata = std::fs::metadata(path).map_err(|e| DecodeError::io(path, &e))?;
    if metadata.len() > limits.max_file_size {
        return Err(DecodeError::file_read(format!(
            "file too large: {} exceeds limit of {} bytes",
            path.display(),
            limits.max_file_size
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| DecodeError::io(path, &e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
