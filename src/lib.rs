//! # serde_ini
//!
//! An INI codec with nested sections, array keys and a Serde bridge.
//!
//! ## What does it handle?
//!
//! INI is a line-based configuration format: `key=value` lines grouped under
//! `[section]` headers. This crate reads and writes the dialect used by many
//! package managers and tools:
//!
//! - **Nested sections**: `[a.b.c]` addresses a section three levels deep
//! - **Arrays**: `key[]=value` lines collect into a list
//! - **Comments**: `;` and `#`, both as whole lines and after a value
//! - **JSON literals**: quoted values such as `"a = b"` or `'5'` are parsed as JSON
//! - **Safe keys**: `__proto__` is never written into a document
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_ini = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Dynamic documents
//!
//! ```rust
//! use serde_ini::{decode, encode_with_options, EncodeOptions, LineEnding, Value};
//!
//! let doc = decode("scope=global\n\n[database]\nuser=dbuser\npassword=dbpassword\n");
//! assert_eq!(doc.get("scope"), Some(&Value::from("global")));
//!
//! let options = EncodeOptions::new().with_line_ending(LineEnding::Lf);
//! let text = encode_with_options(&doc, &options);
//! assert_eq!(text, "scope=global\n\n[database]\nuser=dbuser\npassword=dbpassword\n");
//! ```
//!
//! ### Typed structs
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ini::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Database { user: String, port: u16 }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config { scope: String, database: Database }
//!
//! let config = Config {
//!     scope: "global".to_string(),
//!     database: Database { user: "dbuser".to_string(), port: 5432 },
//! };
//!
//! let text = to_string(&config).unwrap();
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ## Logging
//!
//! The codec reports through [`tracing`]: skipped lines at `trace` level and
//! dropped reserved names at `debug` level. Install a subscriber to see them.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the exact grammar and escaping rules.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - decoding and encoding a small document
//! - **`macro.rs`** - building documents with the ini! macro
//! - **`sections.rs`** - nested and dotted sections
//! - **`dynamic_values.rs`** - working with Value dynamically
//! - **`custom_options.rs`** - whitespace, inline arrays and other options
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod escape;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod path;
pub mod ser;
pub mod value;

pub use de::{Decoder, ValueDeserializer};
pub use error::{Error, Result};
pub use escape::{safe, unsafe_exact, unsafe_value};
pub use map::IniMap;
pub use options::{DecodeOptions, EncodeOptions, LineEnding};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, Value};

use serde::{Deserialize, Serialize};
use std::io;

/// Decode INI text into a document with default options.
///
/// Decoding never fails; lines that are neither a section nor an assignment are
/// skipped.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{decode, Value};
///
/// let doc = decode("a=1\n[s]\nb[]=x\nb[]=y\n");
/// assert_eq!(doc.get("a"), Some(&Value::from("1")));
/// assert_eq!(
///     doc.get("s").and_then(|s| s.get("b")),
///     Some(&Value::Array(vec![Value::from("x"), Value::from("y")]))
/// );
/// ```
#[must_use]
pub fn decode(text: &str) -> IniMap {
    decode_with_options(text, &DecodeOptions::default())
}

/// Decode INI text into a document with custom options.
#[must_use]
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> IniMap {
    Decoder::new(options).decode(text)
}

/// Encode a document as INI text with default options.
///
/// Lines end with the platform line ending; use [`encode_with_options`] to pick
/// one explicitly.
#[must_use]
pub fn encode(doc: &IniMap) -> String {
    encode_with_options(doc, &EncodeOptions::default())
}

/// Encode a document as INI text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{encode_with_options, ini, EncodeOptions, LineEnding};
///
/// let doc = ini!({ "type": "file" });
/// let options = EncodeOptions::from("log").with_line_ending(LineEnding::Lf);
/// assert_eq!(encode_with_options(doc.as_section().unwrap(), &options), "[log]\ntype=file\n");
/// ```
#[must_use]
pub fn encode_with_options(doc: &IniMap, options: &EncodeOptions) -> String {
    Encoder::new(options).encode(doc)
}

/// Alias of [`decode`].
#[must_use]
pub fn parse(text: &str) -> IniMap {
    decode(text)
}

/// Alias of [`encode`].
#[must_use]
pub fn stringify(doc: &IniMap) -> String {
    encode(doc)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_ini::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_section());
/// ```
///
/// # Errors
///
/// Returns an error if the value contains tuple or struct enum variants, or map
/// keys that are not scalars.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert!(text.starts_with("x=1"));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted, or if its top level is not
/// a struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to INI text with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted, or if its top level is not
/// a struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Section(doc) => Ok(encode_with_options(&doc, options)),
        other => Err(Error::unsupported_type(&format!(
            "top-level {} (expected a struct or map)",
            other.kind()
        ))),
    }
}

/// Serialize any `T: Serialize` to a writer as INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert!(!buffer.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer as INI text with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value does not fit the shape of `T` or a string cannot
/// be parsed as the requested number or bool.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x=1\ny=2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the decoded document cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserialize an instance of type `T` from INI text with custom options.
///
/// # Errors
///
/// Returns an error if the decoded document cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_value(Value::Section(decode_with_options(s, options)))
}

/// Deserialize an instance of type `T` from an I/O stream of INI text.
///
/// # Examples
///
/// ```rust
/// use serde_ini::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x=1\ny=2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the data cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of INI text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be deserialized to
/// type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Database {
        user: String,
        password: Option<String>,
        port: u16,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        scope: String,
        debug: bool,
        tags: Vec<String>,
        database: Database,
    }

    fn config() -> Config {
        Config {
            scope: "global".to_string(),
            debug: true,
            tags: vec!["a".to_string(), "b;c".to_string()],
            database: Database {
                user: "dbuser".to_string(),
                password: None,
                port: 5432,
            },
        }
    }

    #[test]
    fn test_parse_and_stringify_aliases() {
        let text = "a=1\n\n[s]\nb=x\n";
        assert_eq!(parse(text), decode(text));
        let doc = parse(text);
        assert_eq!(stringify(&doc), encode(&doc));
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_config() {
        let options = EncodeOptions::new().with_line_ending(LineEnding::Lf);
        let text = to_string_with_options(&config(), &options).unwrap();
        assert_eq!(
            text,
            "scope=global\ndebug=true\ntags[]=a\ntags[]=b\\;c\n\n\
             [database]\nuser=dbuser\npassword=null\nport=5432\n"
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let text = to_string(&config()).unwrap();
        let back: Config = from_str(&text).unwrap();
        assert_eq!(back, config());
    }

    #[test]
    fn test_single_item_list() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Tags {
            tags: Vec<String>,
        }

        let tags: Tags = from_str("tags=only").unwrap();
        assert_eq!(tags.tags, vec!["only".to_string()]);
    }

    #[test]
    fn test_top_level_must_be_a_map() {
        let err = to_string(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value.get("x"), Some(&Value::Number(Number::Integer(1))));
        assert_eq!(value.get("y"), Some(&Value::Number(Number::Integer(2))));
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer_with_options(
            &mut buffer,
            &Point { x: 1, y: 2 },
            &EncodeOptions::new().with_line_ending(LineEnding::Lf),
        )
        .unwrap();
        assert_eq!(buffer, b"x=1\ny=2\n");
    }
}
