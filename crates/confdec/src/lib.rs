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

//! # Confdec - Line-Oriented Configuration Decoder
//!
//! Decodes plain-text `key value` configuration files into Rust structs.
//!
//! ## Quick Start
//!
//! ```rust
//! use confdec::{decode_str, DecodeOptions, Record};
//!
//! #[derive(Record, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     #[confdec(rename = "allow")]
//!     allowed: Vec<String>,
//! }
//!
//! let text = "\
//! # listener
//! host example.org
//! port 8080
//! allow [10.0.0.1, 10.0.0.2]
//! ";
//!
//! let mut server = Server::default();
//! decode_str(text, &mut server, &DecodeOptions::default()).unwrap();
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.allowed, ["10.0.0.1", "10.0.0.2"]);
//! ```
//!
//! ## Format
//!
//! - One `key value` pair per line; the value runs to the end of the line.
//! - `#` in the first column starts a comment; blank lines are ignored.
//! - A key alone on a line maps to the empty value, which leaves fields untouched.
//!
//! ## Nested Records
//!
//! Under [`NestedMode::Flatten`] (the default) a nested record's fields are
//! matched against top-level keys by their own names. Under
//! [`NestedMode::SingleRow`] the row named after the nested field supplies
//! all of its fields in declaration order:
//!
//! ```rust
//! use confdec::{decode_str, DecodeOptions, NestedMode, Record};
//!
//! #[derive(Record, Default)]
//! struct Point { x: i32, y: i32 }
//!
//! #[derive(Record, Default)]
//! struct Shape { origin: Point }
//!
//! let opts = DecodeOptions::builder().nested_mode(NestedMode::SingleRow).build();
//! let mut shape = Shape::default();
//! decode_str("origin 3 4\n", &mut shape, &opts).unwrap();
//! assert_eq!((shape.origin.x, shape.origin.y), (3, 4));
//! ```

// Generated impls name `::confdec`; this lets them resolve inside the crate.
extern crate self as confdec;

mod error_ext;

pub use confdec_core::{
    // Conversion rules
    convert,
    // Parsing
    parse,
    parse_str,
    read_source,
    // Binding
    Binder,
    // Errors
    DecodeError,
    DecodeErrorKind,
    DecodeResult,
    // Options
    DecodeOptions,
    DecodeOptionsBuilder,
    DuplicateKeys,
    // Records
    Field,
    FieldSlot,
    IntSeqSlot,
    IntSlot,
    Limits,
    NestedMode,
    // Model
    ParsedModel,
    RawValue,
    Record,
    Row,
    Slot,
    ValueSplit,
};
pub use confdec_derive::Record;
pub use error_ext::DecodeResultExt;

use std::path::Path;
use tracing::debug;

/// One or more decode targets.
///
/// Implemented for a single record reference, and for arrays and vectors
/// of `&mut dyn Record` when several structs are filled from one file.
pub trait Targets<'t> {
    fn into_targets(self) -> Vec<&'t mut dyn Record>;
}

impl<'t, T: Record + 't> Targets<'t> for &'t mut T {
    fn into_targets(self) -> Vec<&'t mut dyn Record> {
        let target: &'t mut dyn Record = self;
        vec![target]
    }
}

impl<'t, const N: usize> Targets<'t> for [&'t mut dyn Record; N] {
    fn into_targets(self) -> Vec<&'t mut dyn Record> {
        self.into_iter().collect()
    }
}

impl<'t> Targets<'t> for Vec<&'t mut dyn Record> {
    fn into_targets(self) -> Vec<&'t mut dyn Record> {
        self
    }
}

/// Parse a configuration file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> DecodeResult<ParsedModel> {
    parse_file_with(path, &DecodeOptions::default())
}

/// Parse a configuration file with custom options.
pub fn parse_file_with(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> DecodeResult<ParsedModel> {
    let path = path.as_ref();
    confdec_core::parse_file_with(path, options)
        .with_context(|| format!("while parsing {}", path.display()))
}

/// Parse a file and bind it into `targets` with default options.
pub fn decode_file<'t>(path: impl AsRef<Path>, targets: impl Targets<'t>) -> DecodeResult<()> {
    decode_file_with(path, targets, &DecodeOptions::default())
}

/// Parse a file and bind it into `targets`.
///
/// ```rust,no_run
/// use confdec::{decode_file_with, DecodeOptions, Record};
///
/// #[derive(Record, Default)]
/// struct Database { url: String, pool: u32 }
///
/// #[derive(Record, Default)]
/// struct Cache { ttl: u64 }
///
/// let (mut db, mut cache) = (Database::default(), Cache::default());
/// decode_file_with(
///     "/etc/app.conf",
///     [&mut db as &mut dyn confdec::Record, &mut cache],
///     &DecodeOptions::default(),
/// )?;
/// # Ok::<(), confdec::DecodeError>(())
/// ```
pub fn decode_file_with<'t>(
    path: impl AsRef<Path>,
    targets: impl Targets<'t>,
    options: &DecodeOptions,
) -> DecodeResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "decoding configuration file");
    let model = parse_file_with(path, options)?;
    model
        .bind_with(targets.into_targets(), options)
        .with_context(|| format!("while decoding {}", path.display()))
}

/// Parse in-memory text and bind it into `targets`.
pub fn decode_str<'t>(
    text: &str,
    targets: impl Targets<'t>,
    options: &DecodeOptions,
) -> DecodeResult<()> {
    let model = parse_str(text, options)?;
    model.bind_with(targets.into_targets(), options)
}
