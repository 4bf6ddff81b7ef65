//! INI encoding.
//!
//! This module turns an [`IniMap`] into INI text, and any `T: Serialize` into a
//! [`Value`] through [`ValueSerializer`].
//!
//! ## Overview
//!
//! A section is written as one block:
//!
//! - **Plain entries** first, in insertion order, as `key=value` lines
//! - **Arrays** as one `key[]=item` line per element (`key=item` with inline arrays)
//! - **Nested sections** after that, each as its own `[parent.child]` block
//!
//! Blocks are separated by exactly one blank line. The output never starts or
//! ends with a blank line.
//!
//! ## Usage
//!
//! ```rust
//! use serde_ini::{encode_with_options, ini, EncodeOptions, LineEnding};
//!
//! let doc = ini!({
//!     "log": { "type": "file", "level": { "label": "debug" } }
//! });
//! let options = EncodeOptions::new().with_line_ending(LineEnding::Lf);
//! let text = encode_with_options(doc.as_section().unwrap(), &options);
//! assert_eq!(text, "[log]\ntype=file\n\n[log.level]\nlabel=debug\n");
//! ```

use crate::escape::{safe, safe_key};
use crate::path::escape_segment;
use crate::{EncodeOptions, Error, IniMap, Number, Result, Value};
use serde::{ser, Serialize};
use tracing::trace;

/// The INI encoder.
///
/// Created via [`Encoder::new`]; [`Encoder::encode`] writes one section together
/// with all of its children.
pub struct Encoder<'o> {
    options: &'o EncodeOptions,
    output: String,
}

impl<'o> Encoder<'o> {
    pub fn new(options: &'o EncodeOptions) -> Self {
        Encoder {
            options,
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `map` as the section named by the options, then its children.
    pub fn encode(mut self, map: &IniMap) -> String {
        self.write_section(map);
        self.output
    }

    fn write_line(&mut self, key: &str, value: &str) {
        self.output.push_str(key);
        self.output.push_str(self.options.separator());
        self.output.push_str(value);
        self.output.push_str(self.options.line_ending.as_str());
    }

    fn write_section(&mut self, map: &IniMap) {
        let options = self.options;
        let eol = options.line_ending.as_str();
        trace!(section = ?options.section, entries = map.len(), "encoding section");

        let mut children = Vec::new();
        for (key, value) in map {
            match value {
                Value::Array(items) => {
                    let written_key = if options.inline_arrays {
                        safe_key(key)
                    } else {
                        safe_key(&format!("{}[]", key))
                    };
                    for item in items {
                        self.write_line(&written_key, &safe(item, Some(key), options));
                    }
                }
                Value::Section(section) => children.push((key, section)),
                other => self.write_line(&safe_key(key), &safe(other, Some(key), options)),
            }
        }

        if let Some(section) = &options.section {
            let keep_empty = children.is_empty() && options.allow_empty_section;
            if !self.output.is_empty() || keep_empty {
                let header = format!("[{}]{}", safe_key(section), eol);
                self.output.insert_str(0, &header);
            }
        }

        for (key, section) in children {
            let name = escape_segment(key);
            let path = match &options.section {
                Some(parent) => format!("{}.{}", parent, name),
                None => name,
            };
            let child_options = options.for_child(path);
            let child = Encoder::new(&child_options).encode(section);
            if !self.output.is_empty() && !child.is_empty() {
                self.output.push_str(eol);
            }
            self.output.push_str(&child);
        }
    }
}

/// Serializer whose output is a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_ini::{Value, ValueSerializer};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Point { x: 1, y: 2 }.serialize(ValueSerializer).unwrap();
/// assert_eq!(value.get("x"), Some(&Value::from(1i64)));
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: IniMap,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            // Too large for i64; the decimal text keeps every digit.
            Err(_) => Ok(Value::String(v.to_string())),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Number(Number::Integer(i64::from(b))))
            .collect();
        Ok(Value::Array(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    /// Written as a one-entry section named after the variant.
    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = IniMap::new();
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Section(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn with_capacity(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: IniMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            scalar @ (Value::String(_) | Value::Bool(_) | Value::Number(_)) => {
                self.current_key = Some(scalar.into_key_string());
                Ok(())
            }
            other => Err(Error::type_mismatch("scalar map key", other.kind())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Section(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Section(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeStruct::end(self)
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineEnding;

    fn lf() -> EncodeOptions {
        EncodeOptions::new().with_line_ending(LineEnding::Lf)
    }

    fn encode(map: &IniMap, options: &EncodeOptions) -> String {
        Encoder::new(options).encode(map)
    }

    fn log_doc() -> IniMap {
        let mut level = IniMap::new();
        level.insert("label".to_string(), Value::from("debug"));
        level.insert("value".to_string(), Value::from(10i64));
        let mut log = IniMap::new();
        log.insert("type".to_string(), Value::from("file"));
        log.insert("level".to_string(), Value::Section(level));
        let mut doc = IniMap::new();
        doc.insert("log".to_string(), Value::Section(log));
        doc
    }

    #[test]
    fn test_sections_after_scalars() {
        let mut doc = log_doc();
        doc.insert("top".to_string(), Value::from("1"));
        let text = encode(&doc, &lf());
        assert_eq!(
            text,
            "top=1\n\n[log]\ntype=file\n\n[log.level]\nlabel=debug\nvalue=10\n"
        );
    }

    #[test]
    fn test_prefix_section() {
        let text = encode(&log_doc(), &lf().with_section("prefix"));
        assert_eq!(
            text,
            "[prefix.log]\ntype=file\n\n[prefix.log.level]\nlabel=debug\nvalue=10\n"
        );
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let options = EncodeOptions::new()
            .with_whitespace(true)
            .with_line_ending(LineEnding::CrLf);
        let text = encode(&log_doc(), &options);
        assert_eq!(
            text,
            "[log]\r\ntype = file\r\n\r\n[log.level]\r\nlabel = debug\r\nvalue = 10\r\n"
        );
    }

    #[test]
    fn test_arrays() {
        let mut doc = IniMap::new();
        doc.insert(
            "ar".to_string(),
            Value::Array(vec![Value::from("one"), Value::from("a;b")]),
        );
        doc.insert("empty".to_string(), Value::Array(Vec::new()));

        assert_eq!(encode(&doc, &lf()), "ar[]=one\nar[]=a\\;b\n");
        assert_eq!(
            encode(&doc, &lf().with_inline_arrays(true)),
            "ar=one\nar=a\\;b\n"
        );
    }

    #[test]
    fn test_empty_sections() {
        let mut doc = IniMap::new();
        doc.insert("empty".to_string(), Value::Section(IniMap::new()));
        doc.insert("after".to_string(), Value::Section(IniMap::new()));

        assert_eq!(encode(&doc, &lf()), "");
        assert_eq!(
            encode(&doc, &lf().with_allow_empty_section(true)),
            "[empty]\n\n[after]\n"
        );
    }

    #[test]
    fn test_parent_without_entries_has_no_header() {
        let mut inner = IniMap::new();
        inner.insert("k".to_string(), Value::from("v"));
        let mut outer = IniMap::new();
        outer.insert("b".to_string(), Value::Section(inner));
        let mut doc = IniMap::new();
        doc.insert("a".to_string(), Value::Section(outer));

        let text = encode(&doc, &lf().with_allow_empty_section(true));
        assert_eq!(text, "[a.b]\nk=v\n");
    }

    #[test]
    fn test_dotted_child_name_is_escaped() {
        let mut inner = IniMap::new();
        inner.insert("k".to_string(), Value::from("v"));
        let mut doc = IniMap::new();
        doc.insert("x.y".to_string(), Value::Section(inner));

        assert_eq!(encode(&doc, &lf()), "[x\\.y]\nk=v\n");
    }

    #[test]
    fn test_quoted_keys() {
        let mut doc = IniMap::new();
        doc.insert("a=b".to_string(), Value::from("c"));
        doc.insert(" padded".to_string(), Value::Array(vec![Value::from("x")]));

        assert_eq!(encode(&doc, &lf()), "\"a=b\"=c\n\" padded[]\"=x\n");
    }

    #[test]
    fn test_keys_starting_with_a_quote_are_quoted() {
        let mut doc = IniMap::new();
        doc.insert("\"".to_string(), Value::from(" "));
        doc.insert("\"title".to_string(), Value::from("say \"hi\""));

        assert_eq!(
            encode(&doc, &lf()),
            "\"\\\"\"=\" \"\n\"\\\"title\"=say \"hi\"\n"
        );
    }

    #[test]
    fn test_backslashes_in_section_names_are_escaped() {
        let mut child = IniMap::new();
        child.insert("k".to_string(), Value::from("v"));
        let mut inner = IniMap::new();
        inner.insert("x".to_string(), Value::from("1"));
        inner.insert("q".to_string(), Value::Section(child));
        let mut doc = IniMap::new();
        doc.insert("a\\".to_string(), Value::Section(inner));

        assert_eq!(
            encode(&doc, &lf()),
            "[a\\\\\\\\]\nx=1\n\n[a\\\\\\.q]\nk=v\n"
        );
    }

    #[test]
    fn test_force_stringify_and_exact() {
        let mut doc = IniMap::new();
        doc.insert("port".to_string(), Value::from("80"));
        doc.insert("url".to_string(), Value::from("http://x/#a"));

        let options = lf()
            .with_force_stringify_keys(["port"])
            .with_exact_value(true);
        assert_eq!(encode(&doc, &options), "port=\"80\"\nurl=http://x/#a\n");
    }

    #[test]
    fn test_value_serializer_keys() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let value = to_value(&map).unwrap();
        assert_eq!(value.get("1"), Some(&Value::from("one")));

        let nested: BTreeMap<Vec<u8>, u8> = [(vec![1u8], 1u8)].into_iter().collect();
        assert!(matches!(
            to_value(&nested),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_value_serializer_large_u64() {
        assert_eq!(to_value(&u64::MAX).unwrap(), Value::from(u64::MAX.to_string()));
    }
}
