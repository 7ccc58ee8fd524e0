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

//! Leaf value coercion shared by the binder and the slot implementations.

use crate::error::{DecodeError, DecodeResult};
use std::num::IntErrorKind;

/// Integer primitives that can be bound from text.
pub trait Integer: Copy + TryFrom<i128> + TryFrom<u128> + 'static {
    /// Type name used in error messages.
    const KIND: &'static str;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Integer for $t {
                const KIND: &'static str = stringify!($t);
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Parse a base-10 integer and check that it fits `T`.
///
/// Non-numeric text is a `Conversion` error; numeric text outside the range
/// of `T` is an `Overflow` error.
pub fn parse_integer<T: Integer>(field: &str, raw: &str) -> DecodeResult<T> {
    let overflow = || DecodeError::overflow(field, raw, T::KIND);
    match raw.parse::<i128>() {
        Ok(wide) => T::try_from(wide).map_err(|_| overflow()),
        // Above i128::MAX only u128 can still hold the value.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => raw
            .parse::<u128>()
            .ok()
            .and_then(|wide| T::try_from(wide).ok())
            .ok_or_else(overflow),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Err(overflow()),
        Err(_) => Err(DecodeError::conversion(field, raw, T::KIND)),
    }
}

/// Split a raw value into sequence elements.
///
/// One enclosing `[]` or `{}` pair is removed first, then the text is split
/// on `delimiter`, every token is trimmed and empty tokens are dropped. An
/// empty value yields an empty vector. An empty delimiter leaves the value
/// unsplit.
pub fn split_sequence<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    let inner = strip_brackets(raw.trim());
    if delimiter.is_empty() {
        let token = inner.trim();
        return if token.is_empty() { Vec::new() } else { vec![token] };
    }
    inner
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split a single-row nested value into per-field tokens.
///
/// An empty delimiter splits on any whitespace.
pub fn split_fields<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return raw.split_whitespace().collect();
    }
    raw.split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Convert every token, committing nothing unless all succeed.
pub fn parse_integers<T: Integer>(field: &str, tokens: &[&str]) -> DecodeResult<Vec<T>> {
    tokens.iter().map(|t| parse_integer(field, t)).collect()
}

fn strip_brackets(s: &str) -> &str {
    for (open, close) in [('[', ']'), ('{', '}')] {
        if let Some(inner) = s.strip_prefix(open).and_then(|r| r.strip_suffix(close)) {
            return inner;
        }
    }
    s
}
