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

//! Core parser and binder for confdec configuration files.
//!
//! The format is one `key value` pair per line, with `#` comments in the
//! first column. This crate provides:
//!
//! - the line parser producing a [`ParsedModel`] (rows, unique keys, lookup),
//! - the [`Record`] field-descriptor tables targets expose,
//! - the [`Binder`] that converts values into typed fields,
//! - the shared conversion rules in [`convert`].
//!
//! Most users want the `confdec` facade crate, which adds
//! `#[derive(Record)]` and file-level helpers.

mod binder;
pub mod convert;
mod error;
mod limits;
mod model;
mod options;
mod parser;
mod preprocess;
mod record;

pub use binder::Binder;
pub use error::{DecodeError, DecodeErrorKind, DecodeResult};
pub use limits::{read_source, Limits};
pub use model::{ParsedModel, RawValue, Row};
pub use options::{DecodeOptions, DecodeOptionsBuilder, DuplicateKeys, NestedMode, ValueSplit};
pub use parser::{parse, parse_file_with, parse_str};
pub use record::{Field, FieldSlot, IntSeqSlot, IntSlot, Record, Slot};
