//! Escaping of single keys and values.
//!
//! [`safe`] turns a value into text that can sit on either side of `key=value`
//! or inside a `[section]` header. [`unsafe_value`] is its inverse for a raw line
//! fragment, and [`unsafe_exact`] is the variant used when values are read
//! verbatim.
//!
//! ## Quoting
//!
//! A value is written as a JSON literal when the plain form would be misread:
//! non-strings, strings containing `\n`, `\r` or `=`, strings starting with `[`,
//! strings already wrapped in quotes and strings with surrounding whitespace.
//!
//! ## Comments
//!
//! An unescaped `;` or `#` inside a plain value starts a comment, wherever it
//! appears. [`safe`] therefore writes them as `\;` and `\#`.
//!
//! ```rust
//! use serde_ini::{safe, unsafe_value, EncodeOptions, Value};
//!
//! let options = EncodeOptions::new();
//! assert_eq!(safe(&Value::from("a;b"), None, &options), "a\\;b");
//! assert_eq!(unsafe_value("a\\;b ; trailing comment"), Value::from("a;b"));
//! assert_eq!(unsafe_value("x  # y"), Value::from("x"));
//! ```

use crate::{EncodeOptions, Value};

const ESCAPABLE: [char; 3] = ['\\', ';', '#'];
const COMMENT: [char; 2] = [';', '#'];

/// Returns `true` if `text` starts and ends with the same quote character.
fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}

fn needs_quotes(s: &str) -> bool {
    s.contains(['\n', '\r', '='])
        || s.starts_with('[')
        || is_quoted(s)
        || s != s.trim()
}

fn json_literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        other => serde_json::to_string(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Escapes comment characters, and the backslashes that would otherwise swallow
/// them, so that the scanner in [`unsafe_value`] reads back the original text.
fn escape_comments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ';' | '#' => {
                out.push('\\');
                out.push(ch);
            }
            '\\' => {
                out.push('\\');
                if chars.peek().map_or(true, |next| ESCAPABLE.contains(next)) {
                    out.push('\\');
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Writes a key or section name. Keys never use exact mode or forced quoting.
///
/// A key starting with `"` is always quoted, so that a line starting with a
/// quote is read back as a JSON-quoted key.
pub(crate) fn safe_key(key: &str) -> String {
    if needs_quotes(key) || key.starts_with('"') {
        quote(key)
    } else {
        escape_comments(key)
    }
}

/// Produces the textual form of `value` for one side of an INI line.
///
/// `key` is the key the value belongs to; it only matters when
/// [`EncodeOptions::force_stringify_keys`] lists it.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{safe, EncodeOptions, Value};
///
/// let options = EncodeOptions::new();
/// assert_eq!(safe(&Value::from("plain"), None, &options), "plain");
/// assert_eq!(safe(&Value::from("eq=eq"), None, &options), "\"eq=eq\"");
/// assert_eq!(safe(&Value::from(" padded "), None, &options), "\" padded \"");
/// assert_eq!(safe(&Value::Bool(true), None, &options), "true");
///
/// let exact = EncodeOptions::new().with_exact_value(true);
/// assert_eq!(safe(&Value::from("a;b"), None, &exact), "a;b");
/// ```
#[must_use]
pub fn safe(value: &Value, key: Option<&str>, options: &EncodeOptions) -> String {
    let s = match value {
        Value::String(s) if !needs_quotes(s) && !options.forces_quotes(key) => s,
        other => return json_literal(other),
    };
    if options.exact_value {
        s.to_string()
    } else {
        escape_comments(s)
    }
}

/// Unwraps a quoted fragment: one layer of single quotes is removed, then the
/// rest is parsed as a JSON literal. Unparseable text is kept as it is.
fn unquote(text: &str) -> Value {
    let inner = if text.starts_with('\'') {
        &text[1..text.len() - 1]
    } else {
        text
    };
    serde_json::from_str(inner).unwrap_or_else(|_| Value::String(inner.to_string()))
}

/// Reads a raw key or value fragment back into a value.
///
/// Surrounding whitespace is trimmed. Quoted fragments go through JSON literal
/// parsing; anything else is scanned for backslash escapes and cut at the first
/// unescaped `;` or `#`.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{unsafe_value, Value};
///
/// assert_eq!(unsafe_value(""), Value::from(""));
/// assert_eq!(unsafe_value("x;y"), Value::from("x"));
/// assert_eq!(unsafe_value("\"a;b\""), Value::from("a;b"));
/// assert_eq!(unsafe_value("'5'"), Value::from(5i64));
/// assert_eq!(unsafe_value("x \"\\"), Value::from("x \"\\"));
/// ```
#[must_use]
pub fn unsafe_value(text: &str) -> Value {
    let text = text.trim();
    if is_quoted(text) {
        return unquote(text);
    }

    let mut escaping = false;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if escaping {
            if !ESCAPABLE.contains(&ch) {
                out.push('\\');
            }
            out.push(ch);
            escaping = false;
        } else if COMMENT.contains(&ch) {
            break;
        } else if ch == '\\' {
            escaping = true;
        } else {
            out.push(ch);
        }
    }
    if escaping {
        out.push('\\');
    }
    Value::String(out.trim().to_string())
}

/// Reads a raw value fragment without any comment handling.
///
/// # Examples
///
/// ```rust
/// use serde_ini::{unsafe_exact, Value};
///
/// assert_eq!(unsafe_exact("  a;b # c  "), Value::from("a;b # c"));
/// assert_eq!(unsafe_exact("\"quoted\""), Value::from("quoted"));
/// ```
#[must_use]
pub fn unsafe_exact(text: &str) -> Value {
    let text = text.trim();
    if is_quoted(text) {
        return unquote(text);
    }
    Value::String(text.to_string())
}

/// Reads a key fragment. Keys are always strings; a JSON literal that decodes to
/// another scalar is used through its text form.
pub(crate) fn unsafe_key(text: &str) -> String {
    unsafe_value(text).into_key_string()
}
