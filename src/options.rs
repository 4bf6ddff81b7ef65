//! Configuration options for INI encoding and decoding.
//!
//! - [`EncodeOptions`]: how a document is written (separator, arrays, sections, quoting)
//! - [`DecodeOptions`]: how text is read (bare-key default, repeated keys, exact values)
//! - [`LineEnding`]: `\n` or `\r\n`, defaulting to the host platform's convention
//!
//! ## Examples
//!
//! ```rust
//! use serde_ini::{encode_with_options, EncodeOptions, IniMap, LineEnding, Value};
//!
//! let mut doc = IniMap::new();
//! doc.insert("type".to_string(), Value::from("file"));
//!
//! let options = EncodeOptions::new()
//!     .with_section("log")
//!     .with_whitespace(true)
//!     .with_line_ending(LineEnding::Lf);
//! assert_eq!(encode_with_options(&doc, &options), "[log]\ntype = file\n");
//! ```

use crate::Value;

/// Line terminator written after every encoded line.
///
/// # Examples
///
/// ```rust
/// use serde_ini::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The line ending used by the host platform: `\r\n` on Windows, `\n` elsewhere.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

/// Configuration options for INI encoding.
///
/// A plain string converts into options with only [`EncodeOptions::section`] set,
/// so `EncodeOptions::from("prefix")` nests the whole document under `[prefix]`.
///
/// # Examples
///
/// ```rust
/// use serde_ini::EncodeOptions;
///
/// let options = EncodeOptions::from("prefix");
/// assert_eq!(options.section.as_deref(), Some("prefix"));
/// assert!(!options.whitespace);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Section path prefix for the top level of this call.
    pub section: Option<String>,
    /// Write `key = value` instead of `key=value`.
    pub whitespace: bool,
    /// Write arrays as repeated `key=` lines instead of `key[]=` lines.
    pub inline_arrays: bool,
    /// Keys whose values are always written as quoted JSON literals.
    pub force_stringify_keys: Vec<String>,
    /// Write string values verbatim, without escaping `;` and `#`.
    pub exact_value: bool,
    /// Write a `[section]` header for sections that have no entries and no children.
    pub allow_empty_section: bool,
    pub line_ending: LineEnding,
}

impl EncodeOptions {
    /// Creates default options (`key=value`, `key[]` arrays, native line endings).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nests the top level of the document under `section`.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Pads the `=` separator with spaces.
    #[must_use]
    pub fn with_whitespace(mut self, whitespace: bool) -> Self {
        self.whitespace = whitespace;
        self
    }

    /// Writes arrays as repeated bare keys.
    #[must_use]
    pub fn with_inline_arrays(mut self, inline_arrays: bool) -> Self {
        self.inline_arrays = inline_arrays;
        self
    }

    /// Always quotes the values of the given keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ini::{encode_with_options, EncodeOptions, IniMap, LineEnding, Value};
    ///
    /// let mut doc = IniMap::new();
    /// doc.insert("version".to_string(), Value::from("1.0"));
    ///
    /// let options = EncodeOptions::new()
    ///     .with_force_stringify_keys(["version"])
    ///     .with_line_ending(LineEnding::Lf);
    /// assert_eq!(encode_with_options(&doc, &options), "version=\"1.0\"\n");
    /// ```
    #[must_use]
    pub fn with_force_stringify_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_stringify_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Writes string values byte-for-byte instead of escaping comment characters.
    #[must_use]
    pub fn with_exact_value(mut self, exact_value: bool) -> Self {
        self.exact_value = exact_value;
        self
    }

    /// Keeps empty sections as bare `[section]` headers.
    #[must_use]
    pub fn with_allow_empty_section(mut self, allow_empty_section: bool) -> Self {
        self.allow_empty_section = allow_empty_section;
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// The separator placed between a key and its value.
    #[must_use]
    pub fn separator(&self) -> &'static str {
        if self.whitespace {
            " = "
        } else {
            "="
        }
    }

    pub(crate) fn forces_quotes(&self, key: Option<&str>) -> bool {
        key.is_some_and(|key| self.force_stringify_keys.iter().any(|k| k == key))
    }

    /// Options for a child section: everything carries over except the section path.
    pub(crate) fn for_child(&self, section: String) -> Self {
        EncodeOptions {
            section: Some(section),
            ..self.clone()
        }
    }
}

impl From<&str> for EncodeOptions {
    fn from(section: &str) -> Self {
        EncodeOptions::new().with_section(section)
    }
}

impl From<String> for EncodeOptions {
    fn from(section: String) -> Self {
        EncodeOptions::new().with_section(section)
    }
}

/// Configuration options for INI decoding.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{decode_with_options, DecodeOptions, Value};
///
/// let options = DecodeOptions::new().with_default_value(Value::Bool(true));
/// let doc = decode_with_options("verbose\n", &options);
/// assert_eq!(doc.get("verbose"), Some(&Value::Bool(true)));
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Value given to a bare `key` line that has no `=`.
    pub default_value: Value,
    /// Collect repeated plain keys into an array.
    pub inline_arrays: bool,
    /// Read values verbatim: `;` and `#` never start a comment inside a value.
    pub exact_value: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            default_value: Value::String(String::new()),
            inline_arrays: false,
            exact_value: false,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (empty-string default value, no inline arrays).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    #[must_use]
    pub fn with_inline_arrays(mut self, inline_arrays: bool) -> Self {
        self.inline_arrays = inline_arrays;
        self
    }

    #[must_use]
    pub fn with_exact_value(mut self, exact_value: bool) -> Self {
        self.exact_value = exact_value;
        self
    }
}
