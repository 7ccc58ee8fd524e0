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

//! Field-descriptor tables for decode targets.
//!
//! A target type implements [`Record`] by listing its fields in declaration
//! order, each paired with a [`Slot`]: a typed mutable view the binder can
//! write through. `#[derive(Record)]` from the `confdec` crate generates
//! this table; it can also be written by hand:
//!
//! ```
//! use confdec_core::{Field, FieldSlot, Record};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Record for Server {
//!     fn record_name(&self) -> &'static str {
//!         "Server"
//!     }
//!
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("host", self.host.slot()),
//!             Field::new("port", self.port.slot()),
//!         ]
//!     }
//! }
//!
//! let model = confdec_core::parse("host example.org\nport 8080\n");
//! let mut server = Server::default();
//! model.decode_to(&mut server).unwrap();
//! assert_eq!(server.port, 8080);
//! ```

use crate::convert::{parse_integer, parse_integers, Integer};
use crate::error::DecodeResult;
use std::collections::{BTreeMap, HashMap};

/// A type whose fields can be populated from a parsed model.
pub trait Record {
    /// Type name used in diagnostics.
    fn record_name(&self) -> &'static str;

    /// The field table in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Number of fields in the table.
    fn field_count(&mut self) -> usize {
        self.fields().len()
    }

    /// True when there is no record to bind into (e.g. a `None` target).
    fn is_absent(&self) -> bool {
        false
    }
}

/// One entry of a field table.
pub struct Field<'a> {
    /// Key this field is matched against.
    pub name: &'static str,
    /// Writable view of the field.
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, slot: Slot<'a>) -> Self {
        Self { name, slot }
    }
}

/// Typed mutable view of one field.
pub enum Slot<'a> {
    /// A string field.
    Str(&'a mut String),
    /// An integer field of any width.
    Int(&'a mut dyn IntSlot),
    /// A sequence-of-string field.
    StrSeq(&'a mut Vec<String>),
    /// A sequence-of-integer field.
    IntSeq(&'a mut dyn IntSeqSlot),
    /// A nested record.
    Record(&'a mut dyn Record),
    /// A field that cannot be written; it is skipped silently.
    Skip,
    /// A field of a kind the binder does not support.
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Short name of the slot's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(slot) => slot.kind(),
            Self::StrSeq(_) => "sequence of string",
            Self::IntSeq(slot) => slot.kind(),
            Self::Record(_) => "record",
            Self::Skip => "skipped",
            Self::Unsupported(kind) => *kind,
        }
    }
}

/// An integer field with its width erased.
pub trait IntSlot {
    /// Type name used in error messages.
    fn kind(&self) -> &'static str;
    /// Parse `raw` and store it, checking the field's width.
    fn assign(&mut self, field: &str, raw: &str) -> DecodeResult<()>;
}

impl<T: Integer> IntSlot for T {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn assign(&mut self, field: &str, raw: &str) -> DecodeResult<()> {
        *self = parse_integer(field, raw)?;
        Ok(())
    }
}

/// A sequence-of-integer field with its element width erased.
pub trait IntSeqSlot {
    /// Type name used in error messages.
    fn kind(&self) -> &'static str;
    /// Parse every token and replace the sequence; nothing is stored on error.
    fn assign(&mut self, field: &str, tokens: &[&str]) -> DecodeResult<()>;
}

impl<T: Integer> IntSeqSlot for Vec<T> {
    fn kind(&self) -> &'static str {
        "sequence of integer"
    }

    fn assign(&mut self, field: &str, tokens: &[&str]) -> DecodeResult<()> {
        *self = parse_integers(field, tokens)?;
        Ok(())
    }
}

/// Conversion from a field to its slot.
///
/// Implemented for every supported leaf type, for pointer-like wrappers,
/// and for derived records. Types that can never be bound from text return
/// [`Slot::Unsupported`] so the binder reports them by field name.
pub trait FieldSlot {
    fn slot(&mut self) -> Slot<'_>;
}

impl FieldSlot for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Str(self)
    }
}

impl FieldSlot for Vec<String> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::StrSeq(self)
    }
}

macro_rules! impl_integer_slots {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldSlot for $t {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Int(self)
                }
            }

            impl FieldSlot for Vec<$t> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::IntSeq(self)
                }
            }
        )*
    };
}

impl_integer_slots!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_unsupported_slots {
    ($($t:ty => $kind:literal),* $(,)?) => {
        $(
            impl FieldSlot for $t {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unsupported($kind)
                }
            }
        )*
    };
}

impl_unsupported_slots!(
    bool => "bool",
    char => "char",
    f32 => "f32",
    f64 => "f64",
    Vec<bool> => "sequence of bool",
    Vec<char> => "sequence of char",
    Vec<f32> => "sequence of f32",
    Vec<f64> => "sequence of f64",
);

impl<K, V> FieldSlot for HashMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("map")
    }
}

impl<K, V> FieldSlot for BTreeMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("map")
    }
}

/// Unset optional fields are allocated with `T::default()` when visited.
impl<T: FieldSlot + Default> FieldSlot for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        self.get_or_insert_with(T::default).slot()
    }
}

impl<T: FieldSlot + ?Sized> FieldSlot for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

/// An optional top-level target; `None` is rejected by the binder.
impl<T: Record> Record for Option<T> {
    fn record_name(&self) -> &'static str {
        match self {
            Some(record) => record.record_name(),
            None => "None",
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        match self {
            Some(record) => record.fields(),
            None => Vec::new(),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn record_name(&self) -> &'static str {
        (**self).record_name()
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        (**self).fields()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}
