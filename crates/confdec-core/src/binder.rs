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

//! Field binder: writes parsed values into record fields.
//!
//! # Traversal
//!
//! Targets are processed from a FIFO work queue seeded with the top-level
//! records. Under [`NestedMode::Flatten`] nested records are appended to the
//! queue, so every top-level field is bound before any nested field. Under
//! [`NestedMode::SingleRow`] a nested record is filled immediately from the
//! row named after its field.
//!
//! Binding is fail-fast: the first error is returned and fields written
//! before it keep their new values.

use crate::convert::{split_fields, split_sequence};
use crate::error::{DecodeError, DecodeResult};
use crate::model::{ParsedModel, RawValue};
use crate::options::{DecodeOptions, NestedMode};
use crate::record::{Field, Record, Slot};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Binds one parsed model into records using a fixed set of options.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'m> {
    model: &'m ParsedModel,
    options: &'m DecodeOptions,
}

impl<'m> Binder<'m> {
    pub fn new(model: &'m ParsedModel, options: &'m DecodeOptions) -> Self {
        Self { model, options }
    }

    /// Bind every target, top-level fields first.
    pub fn bind<'t, I>(&self, targets: I) -> DecodeResult<()>
    where
        I: IntoIterator<Item = &'t mut dyn Record>,
    {
        let mut queue: VecDeque<&'t mut dyn Record> = VecDeque::new();
        for (index, target) in targets.into_iter().enumerate() {
            if target.is_absent() {
                return Err(DecodeError::invalid_target(format!(
                    "target {} is not a present record",
                    index
                )));
            }
            queue.push_back(target);
        }

        let mut visited = 0usize;
        while let Some(record) = queue.pop_front() {
            visited += 1;
            let record_name = record.record_name();
            for field in record.fields() {
                self.bind_field(field, &mut queue)
                    .map_err(|e| e.with_context(format!("in record {}", record_name)))?;
            }
        }

        debug!(records = visited, mode = ?self.options.nested_mode, "bound configuration");
        Ok(())
    }

    fn bind_field<'t>(
        &self,
        field: Field<'t>,
        queue: &mut VecDeque<&'t mut dyn Record>,
    ) -> DecodeResult<()> {
        let name = field.name;
        match field.slot {
            Slot::Skip => Ok(()),
            Slot::Record(nested) => {
                if nested.field_count() == 0 {
                    return Ok(());
                }
                match self.options.nested_mode {
                    NestedMode::Flatten => {
                        trace!(field = name, "queued nested record");
                        queue.push_back(nested);
                        Ok(())
                    }
                    NestedMode::SingleRow => self.bind_single_row(name, nested),
                }
            }
            slot => match self.lookup(name) {
                Some(value) => {
                    trace!(field = name, kind = slot.kind(), "binding field");
                    self.assign(name, slot, &value.text())
                }
                None => Ok(()),
            },
        }
    }

    /// Fill every field of `nested` from the single row named `name`.
    fn bind_single_row(&self, name: &str, nested: &mut dyn Record) -> DecodeResult<()> {
        let value = match self.lookup(name) {
            Some(value) => value,
            None => return Ok(()),
        };
        // List tokens are rejoined so the field delimiter applies in every mode.
        let text = value.text();
        let tokens = split_fields(&text, &self.options.field_delimiter);

        let fields = nested.fields();
        if tokens.len() != fields.len() {
            return Err(DecodeError::field_count_mismatch(
                name,
                fields.len(),
                tokens.len(),
            ));
        }

        trace!(field = name, values = tokens.len(), "binding single-row record");
        for (field, token) in fields.into_iter().zip(tokens) {
            let path = format!("{}.{}", name, field.name);
            match field.slot {
                Slot::Record(_) => return Err(DecodeError::unsupported(&path, "nested record")),
                slot => self.assign(&path, slot, token)?,
            }
        }
        Ok(())
    }

    /// Missing keys and empty values both mean "leave the field alone".
    fn lookup(&self, name: &str) -> Option<&'m RawValue> {
        self.model.get(name).filter(|value| !value.is_empty())
    }

    /// Apply the leaf conversion rules.
    fn assign(&self, name: &str, slot: Slot<'_>, raw: &str) -> DecodeResult<()> {
        match slot {
            Slot::Str(target) => {
                *target = raw.to_string();
                Ok(())
            }
            Slot::Int(target) => target.assign(name, raw),
            Slot::StrSeq(target) => {
                *target = split_sequence(raw, &self.options.sequence_delimiter)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                Ok(())
            }
            Slot::IntSeq(target) => {
                let tokens = split_sequence(raw, &self.options.sequence_delimiter);
                target.assign(name, &tokens)
            }
            Slot::Skip => Ok(()),
            Slot::Record(_) => Err(DecodeError::unsupported(name, "nested record")),
            Slot::Unsupported(kind) => Err(DecodeError::unsupported(name, kind)),
        }
    }
}

impl ParsedModel {
    /// Bind into several targets using the options the model was parsed with.
    ///
    /// ```
    /// use confdec_core::{parse, Field, FieldSlot, Record};
    ///
    /// #[derive(Default)]
    /// struct Name { name: String }
    /// #[derive(Default)]
    /// struct Age { age: i32 }
    ///
    /// impl Record for Name {
    ///     fn record_name(&self) -> &'static str { "Name" }
    ///     fn fields(&mut self) -> Vec<Field<'_>> { vec![Field::new("name", self.name.slot())] }
    /// }
    /// impl Record for Age {
    ///     fn record_name(&self) -> &'static str { "Age" }
    ///     fn fields(&mut self) -> Vec<Field<'_>> { vec![Field::new("age", self.age.slot())] }
    /// }
    ///
    /// let model = parse("name Alice\nage 30\n");
    /// let (mut name, mut age) = (Name::default(), Age::default());
    /// model.bind([&mut name as &mut dyn Record, &mut age as &mut dyn Record]).unwrap();
    /// assert_eq!((name.name.as_str(), age.age), ("Alice", 30));
    /// ```
    pub fn bind<'t, I>(&self, targets: I) -> DecodeResult<()>
    where
        I: IntoIterator<Item = &'t mut dyn Record>,
    {
        Binder::new(self, self.options()).bind(targets)
    }

    /// Bind into several targets with explicit options.
    pub fn bind_with<'t, I>(&self, targets: I, options: &DecodeOptions) -> DecodeResult<()>
    where
        I: IntoIterator<Item = &'t mut dyn Record>,
    {
        Binder::new(self, options).bind(targets)
    }

    /// Bind into a single target.
    pub fn decode_to<T: Record>(&self, target: &mut T) -> DecodeResult<()> {
        self.bind([target as &mut dyn Record])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use crate::parser::{parse, parse_str};
    use crate::record::FieldSlot;

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Record for Point {
        fn record_name(&self) -> &'static str {
            "Point"
        }

        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new("x", self.x.slot()), Field::new("y", self.y.slot())]
        }
    }

    impl FieldSlot for Point {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }

    #[derive(Debug, Default)]
    struct Config {
        name: String,
        age: i32,
        tags: Vec<String>,
        ports: Vec<u16>,
        point: Point,
        origin: Option<Point>,
        hidden: String,
    }

    impl Record for Config {
        fn record_name(&self) -> &'static str {
            "Config"
        }

        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("name", self.name.slot()),
                Field::new("age", self.age.slot()),
                Field::new("tags", self.tags.slot()),
                Field::new("ports", self.ports.slot()),
                Field::new("point", self.point.slot()),
                Field::new("origin", self.origin.slot()),
                Field::new("hidden", Slot::Skip),
            ]
        }
    }

    #[derive(Default)]
    struct Ratio {
        ratio: f64,
    }

    impl Record for Ratio {
        fn record_name(&self) -> &'static str {
            "Ratio"
        }

        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new("ratio", self.ratio.slot())]
        }
    }

    struct Empty;

    impl Record for Empty {
        fn record_name(&self) -> &'static str {
            "Empty"
        }

        fn fields(&mut self) -> Vec<Field<'_>> {
            Vec::new()
        }
    }

    fn single_row() -> DecodeOptions {
        DecodeOptions::builder()
            .nested_mode(NestedMode::SingleRow)
            .build()
    }

    #[test]
    fn test_bind_scalars() {
        let model = parse("name Alice\nage 30\n");
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.name, "Alice");
        assert_eq!(cfg.age, 30);
    }

    #[test]
    fn test_missing_and_empty_values_leave_fields() {
        let model = parse("name\n");
        let mut cfg = Config {
            name: "keep".into(),
            age: 5,
            ..Config::default()
        };
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.name, "keep");
        assert_eq!(cfg.age, 5);
    }

    #[test]
    fn test_bind_sequences() {
        let model = parse("tags a,b,,c\nports [80, 443]\n");
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.tags, ["a", "b", "c"]);
        assert_eq!(cfg.ports, [80, 443]);
    }

    #[test]
    fn test_bind_custom_sequence_delimiter() {
        let opts = DecodeOptions::builder().sequence_delimiter(";").build();
        let model = parse_str("tags a;b\n", &opts).unwrap();
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.tags, ["a", "b"]);
    }

    #[test]
    fn test_flatten_mode_binds_nested_by_own_keys() {
        let model = parse("x 3\ny 4\n");
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
        assert_eq!(cfg.origin, Some(Point { x: 3, y: 4 }));
    }

    #[test]
    fn test_optional_record_allocated_without_values() {
        let model = parse("name Bob\n");
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.origin, Some(Point::default()));
    }

    #[test]
    fn test_single_row_mode() {
        let model = parse_str("point 3 4\n", &single_row()).unwrap();
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
        assert_eq!(cfg.origin, Some(Point::default()));
    }

    #[test]
    fn test_single_row_count_mismatch() {
        for input in ["point 3\n", "point 3 4 5\n"] {
            let model = parse_str(input, &single_row()).unwrap();
            let mut cfg = Config::default();
            let err = model.decode_to(&mut cfg).unwrap_err();
            assert_eq!(err.kind, DecodeErrorKind::FieldCountMismatch);
            assert_eq!(err.field.as_deref(), Some("point"));
        }
    }

    #[test]
    fn test_single_row_custom_delimiter() {
        let opts = DecodeOptions::builder()
            .nested_mode(NestedMode::SingleRow)
            .field_delimiter(";")
            .build();
        let model = parse_str("point 3; 4\n", &opts).unwrap();
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_single_row_conversion_error_names_path() {
        let model = parse_str("point 3 four\n", &single_row()).unwrap();
        let mut cfg = Config::default();
        let err = model.decode_to(&mut cfg).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Conversion);
        assert_eq!(err.field.as_deref(), Some("point.y"));
        assert_eq!(cfg.point.x, 3);
    }

    #[test]
    fn test_bind_with_overrides_model_options() {
        let model = parse("point 3 4\n");
        let mut cfg = Config::default();
        model
            .bind_with([&mut cfg as &mut dyn Record], &single_row())
            .unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_conversion_error() {
        let model = parse("age thirty\n");
        let mut cfg = Config::default();
        let err = model.decode_to(&mut cfg).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Conversion);
        assert_eq!(err.context.as_deref(), Some("in record Config"));
    }

    #[test]
    fn test_overflow_error() {
        let model = parse("age 99999999999999999999\n");
        let mut cfg = Config::default();
        let err = model.decode_to(&mut cfg).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::Overflow);
    }

    #[test]
    fn test_fail_fast_keeps_earlier_fields() {
        let model = parse("name Alice\nage bad\ntags a\n");
        let mut cfg = Config::default();
        assert!(model.decode_to(&mut cfg).is_err());
        assert_eq!(cfg.name, "Alice");
        assert!(cfg.tags.is_empty());
    }

    #[test]
    fn test_int_sequence_no_partial_commit() {
        let model = parse("ports 80,x\n");
        let mut cfg = Config {
            ports: vec![1],
            ..Config::default()
        };
        assert!(model.decode_to(&mut cfg).is_err());
        assert_eq!(cfg.ports, [1]);
    }

    #[test]
    fn test_skip_slot_ignored() {
        let model = parse("hidden value\n");
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert!(cfg.hidden.is_empty());
    }

    #[test]
    fn test_unsupported_kind() {
        let model = parse("ratio 0.5\n");
        let mut ratio = Ratio::default();
        let err = model.decode_to(&mut ratio).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnsupportedFieldKind);
        assert!(err.message.contains("f64"));
        assert!(err.message.contains("ratio"));
    }

    #[test]
    fn test_unsupported_kind_without_value_is_ignored() {
        let model = parse("other 1\n");
        let mut ratio = Ratio::default();
        model.decode_to(&mut ratio).unwrap();
    }

    #[test]
    fn test_absent_target_is_invalid() {
        let model = parse("x 1\n");
        let mut missing: Option<Point> = None;
        let err = model.decode_to(&mut missing).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidTarget);
    }

    #[test]
    fn test_present_option_target() {
        let model = parse("x 1\n");
        let mut present = Some(Point::default());
        model.decode_to(&mut present).unwrap();
        assert_eq!(present, Some(Point { x: 1, y: 0 }));
    }

    #[test]
    fn test_empty_record_accepted() {
        let model = parse("x 1\n");
        model.decode_to(&mut Empty).unwrap();
    }

    #[test]
    fn test_multiple_targets() {
        let model = parse("name Alice\nx 7\n");
        let mut cfg = Config::default();
        let mut point = Point::default();
        model
            .bind([&mut cfg as &mut dyn Record, &mut point as &mut dyn Record])
            .unwrap();
        assert_eq!(cfg.name, "Alice");
        assert_eq!(point.x, 7);
    }

    #[test]
    fn test_whitespace_split_honors_field_delimiter() {
        for split in [
            crate::options::ValueSplit::Rest,
            crate::options::ValueSplit::Whitespace,
        ] {
            let opts = DecodeOptions::builder()
                .nested_mode(NestedMode::SingleRow)
                .field_delimiter(",")
                .value_split(split)
                .build();
            let model = parse_str("point 3, 4\n", &opts).unwrap();
            let mut cfg = Config::default();
            model.decode_to(&mut cfg).unwrap();
            assert_eq!(cfg.point, Point { x: 3, y: 4 });
        }
    }

    #[test]
    fn test_options_mut_switches_mode_after_parse() {
        let mut model = parse("point 3 4\n");
        model.options_mut().nested_mode = NestedMode::SingleRow;
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_list_values_in_single_row_mode() {
        let opts = DecodeOptions::builder()
            .nested_mode(NestedMode::SingleRow)
            .value_split(crate::options::ValueSplit::Whitespace)
            .build();
        let model = parse_str("point 3 4\nname Alice Smith\n", &opts).unwrap();
        let mut cfg = Config::default();
        model.decode_to(&mut cfg).unwrap();
        assert_eq!(cfg.point, Point { x: 3, y: 4 });
        assert_eq!(cfg.name, "Alice Smith");
    }
}
