//! INI decoding.
//!
//! This module turns INI text into an [`IniMap`] and, through
//! [`ValueDeserializer`], into any `T: Deserialize`.
//!
//! ## Overview
//!
//! Decoding is a single pass over the lines followed by a folding pass:
//!
//! - **Line pass**: blank lines and comments are skipped, `[section]` headers move
//!   the cursor, `key=value` lines are written under the current section. Section
//!   blocks are collected apart from the root entries, under their flat name
//!   (`[a.b]` is collected as `"a.b"`).
//! - **Folding pass**: every section block is placed at the path its name
//!   splits into, merging with sections already there.
//! - **Reserved keys**: `__proto__` is never written, at any depth.
//!
//! Nothing here fails. Lines that are neither a section nor an assignment are
//! skipped.
//!
//! ## Usage
//!
//! ```rust
//! use serde_ini::{decode, Value};
//!
//! let doc = decode("[a]\nb=1\n[a.c]\nd=2\n");
//! let a = doc.get("a").unwrap();
//! assert_eq!(a.get("b"), Some(&Value::from("1")));
//! assert_eq!(a.get("c").and_then(|c| c.get("d")), Some(&Value::from("2")));
//! ```

use crate::escape::{unsafe_exact, unsafe_key, unsafe_value};
use crate::path::{dot_split, is_reserved_key, unescape_segment};
use crate::{DecodeOptions, Error, IniMap, Number, Result, Value};
use indexmap::IndexMap;
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::str::FromStr;
use tracing::{debug, trace};

/// Where assignments currently go.
enum Cursor {
    Root,
    /// Index into the collected section blocks.
    Section(usize),
    /// Assignments under a reserved section header land in a scratch map that is
    /// thrown away.
    Discard,
}

/// One meaningful line of INI text.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Section(&'a str),
    Assignment { key: &'a str, value: Option<&'a str> },
}

/// The line-level INI decoder.
///
/// Created via [`Decoder::new`] and consumed by [`Decoder::decode`]. Most users
/// should call [`crate::decode`] or [`crate::decode_with_options`] instead.
pub struct Decoder<'o> {
    options: &'o DecodeOptions,
    out: IniMap,
    sections: IndexMap<String, IniMap>,
    scratch: IniMap,
    cursor: Cursor,
}

impl<'o> Decoder<'o> {
    pub fn new(options: &'o DecodeOptions) -> Self {
        Decoder {
            options,
            out: IniMap::new(),
            sections: IndexMap::new(),
            scratch: IniMap::new(),
            cursor: Cursor::Root,
        }
    }

    /// Decodes `text` into a document.
    pub fn decode(mut self, text: &str) -> IniMap {
        for line in text.split(['\n', '\r']) {
            self.read_line(line);
        }
        fold_sections(self.out, self.sections)
    }

    fn read_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with([';', '#']) {
            return;
        }
        match parse_line(line) {
            Some(Line::Section(raw)) => self.enter_section(raw),
            Some(Line::Assignment { key, value }) => self.assign(key, value),
            None => trace!(line, "skipping line that is neither a section nor an assignment"),
        }
    }

    fn enter_section(&mut self, raw: &str) {
        let name = unsafe_key(raw);
        if is_reserved_key(&name) {
            debug!(section = %name, "discarding reserved section");
            self.scratch = IniMap::new();
            self.cursor = Cursor::Discard;
            return;
        }
        let entry = self.sections.entry(name);
        self.cursor = Cursor::Section(entry.index());
        entry.or_default();
    }

    fn target(&mut self) -> &mut IniMap {
        match self.cursor {
            Cursor::Root => &mut self.out,
            Cursor::Section(index) => match self.sections.get_index_mut(index) {
                Some((_, section)) => section,
                None => &mut self.scratch,
            },
            Cursor::Discard => &mut self.scratch,
        }
    }

    fn assign(&mut self, raw_key: &str, raw_value: Option<&str>) {
        let mut key = unsafe_key(raw_key);
        if is_reserved_key(&key) {
            debug!(key = %key, "skipping reserved key");
            return;
        }

        let value = match raw_value {
            None => self.options.default_value.clone(),
            Some(raw) if self.options.exact_value => unsafe_exact(raw),
            Some(raw) => unsafe_value(raw),
        };
        let value = coerce_literal(value);

        let array_key = key.len() > 2 && key.ends_with("[]");
        if array_key {
            key.truncate(key.len() - 2);
            if is_reserved_key(&key) {
                debug!(key = %key, "skipping reserved array key");
                return;
            }
        }
        let promote = array_key || self.options.inline_arrays;

        let target = self.target();
        match target.get_mut(&key) {
            // A list is never overwritten, even when the brackets were forgotten.
            Some(Value::Array(items)) => items.push(value),
            Some(existing) if promote => {
                let first = std::mem::take(existing);
                *existing = Value::Array(vec![first, value]);
            }
            Some(existing) => *existing = value,
            None if array_key => {
                target.insert(key, Value::Array(vec![value]));
            }
            None => {
                target.insert(key, value);
            }
        }
    }
}

/// Classifies a non-blank, non-comment line.
fn parse_line(line: &str) -> Option<Line<'_>> {
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Some(Line::Section(&line[1..line.len() - 1]));
    }

    let search_from = quoted_key_end(line);
    let (key, value) = match line[search_from..].find('=') {
        Some(pos) => {
            let split = search_from + pos;
            (&line[..split], Some(&line[split + 1..]))
        }
        None => (line, None),
    };
    if key.is_empty() {
        return None;
    }
    Some(Line::Assignment { key, value })
}

/// Byte offset just past a leading JSON-quoted key, or 0 when the line does not
/// start with one. Lets a quoted key contain `=`.
///
/// The quoted part only counts as the key when nothing but whitespace sits
/// between its closing quote and the `=` or the end of the line. Otherwise the
/// key runs to the first `=`.
fn quoted_key_end(line: &str) -> usize {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('"') {
        return 0;
    }
    let offset = line.len() - trimmed.len();
    let mut escaped = false;
    for (i, ch) in trimmed.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            let end = offset + i + 1;
            let rest = line[end..].trim_start();
            return if rest.is_empty() || rest.starts_with('=') {
                end
            } else {
                0
            };
        }
    }
    0
}

/// Applies the fixed literal table: `true`/`false` in three casings and `null`.
fn coerce_literal(value: Value) -> Value {
    match value {
        Value::String(s) => match s.as_str() {
            "true" | "True" | "TRUE" => Value::Bool(true),
            "false" | "False" | "FALSE" => Value::Bool(false),
            "null" => Value::Null,
            _ => Value::String(s),
        },
        other => other,
    }
}

/// Places every collected section block at the path its name splits into
/// (`a.b.c`, or a single name with an escaped dot like `x\.y`).
///
/// Single-segment names are placed first, in header order, then the nested
/// ones, so `[a.b]` followed by `[a]` merges into one `a` section.
fn fold_sections(mut root: IniMap, sections: IndexMap<String, IniMap>) -> IniMap {
    let mut nested = Vec::new();
    for (name, section) in sections {
        let segments = dot_split(&name);
        if segments.len() == 1 {
            place_section(&mut root, &segments, section);
        } else {
            nested.push((segments, section));
        }
    }

    for (segments, section) in nested {
        place_section(&mut root, &segments, section);
    }
    root
}

fn place_section(root: &mut IniMap, segments: &[String], section: IniMap) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    let leaf = unescape_segment(leaf);
    if is_reserved_key(&leaf) {
        debug!(section = %leaf, "dropping reserved section name");
        return;
    }

    let mut target = root;
    for part in parents {
        let part = unescape_segment(part);
        if is_reserved_key(&part) {
            debug!(segment = %part, "skipping reserved path segment");
            continue;
        }
        target = target.section_mut(&part);
    }

    match target.get_mut(&leaf) {
        Some(Value::Section(existing)) => merge_sections(existing, section),
        _ => {
            target.insert(leaf, Value::Section(section));
        }
    }
}

/// Merges `incoming` into `existing`; nested sections merge recursively and any
/// other incoming value replaces what was there.
fn merge_sections(existing: &mut IniMap, incoming: IniMap) {
    for (key, value) in incoming {
        match value {
            Value::Section(next) => match existing.get_mut(&key) {
                Some(Value::Section(current)) => merge_sections(current, next),
                _ => {
                    existing.insert(key, Value::Section(next));
                }
            },
            value => {
                existing.insert(key, value);
            }
        }
    }
}

/// Deserializes a [`Value`] tree into any `T: Deserialize`.
///
/// INI has no numeric type, so numbers and booleans are parsed out of strings
/// on request. `Null` maps to `None`, and a lone scalar is accepted where a
/// sequence is expected (a key written once without `[]`).
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_ini::{decode, Value, ValueDeserializer};
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Server { host: String, port: u16, tags: Vec<String> }
///
/// let doc = decode("host=localhost\nport=8080\ntags=edge\n");
/// let server = Server::deserialize(ValueDeserializer::new(Value::Section(doc))).unwrap();
/// assert_eq!(server, Server {
///     host: "localhost".to_string(),
///     port: 8080,
///     tags: vec!["edge".to_string()],
/// });
/// ```
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn parse_scalar<T: FromStr>(self, expected: &str) -> Result<T> {
        let text = match self.value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => return Err(Error::type_mismatch(expected, other.kind())),
        };
        text.trim()
            .parse()
            .map_err(|_| Error::invalid_value(&text, expected))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse_scalar::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Section(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Bool(b) => visitor.visit_bool(b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => visitor.visit_bool(true),
                "false" => visitor.visit_bool(false),
                _ => Err(Error::invalid_value(&s, "bool")),
            },
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            // `true`, `false` and `null` were coerced on decode; give the text back.
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => {
                visitor.visit_string(scalar.to_string())
            }
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(ref s) if s.is_empty() => visitor.visit_unit(),
            other => Err(Error::type_mismatch("unit", other.kind())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Section(_) => Err(Error::type_mismatch("sequence", "section")),
            scalar => visitor.visit_seq(SeqDeserializer::new(vec![scalar])),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Section(map) => visitor.visit_map(MapDeserializer::new(map)),
            other => Err(Error::type_mismatch("section", other.kind())),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(variant.into_deserializer()),
            Value::Section(map) if map.len() == 1 => {
                let (variant, value) = map
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("Expected enum variant"))?;
                visitor.visit_enum(EnumDeserializer::new(variant, value))
            }
            other => Err(Error::type_mismatch("enum", other.kind())),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 bytes byte_buf
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: IniMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.kind())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(ValueDeserializer::new(self.value), visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(ValueDeserializer::new(self.value), visitor)
    }
}
