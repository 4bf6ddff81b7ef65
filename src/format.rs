//! INI Format Reference
//!
//! This module documents the INI dialect read and written by this library.
//!
//! # Overview
//!
//! A document is a nested map. Plain entries are `key=value` lines, nested maps
//! are `[section]` blocks addressed by dotted paths, and lists are repeated keys.
//! Every scalar is text on the wire; only `true`, `false` and `null` come back
//! as something other than a string.
//!
//! # Lines
//!
//! Input is split on `\n` and `\r`, so `\n`, `\r\n` and bare `\r` all work.
//! Each line is one of:
//!
//! | Line | Shape | Example |
//! |------|-------|---------|
//! | Blank | empty or whitespace only | |
//! | Comment | first non-blank char is `;` or `#` | `; a comment` |
//! | Section | starts with `[` and ends with `]` | `[log.level]` |
//! | Assignment | `key=value` | `type=file` |
//! | Bare key | no `=` | `verbose` |
//!
//! Anything else (such as a line starting with `=`) is ignored.
//!
//! ## Assignments
//!
//! The key is everything before the first `=`; the value is everything after it,
//! so `a=b=c` assigns `b=c` to `a`. A key written as a JSON string may itself
//! contain `=`: `"a=b"=c`. This only applies when the closing quote is followed
//! by the `=` (or ends the line); `"title=say "hi"` is the key `"title` with the
//! value `say "hi"`. A bare key takes the configured default value, an empty
//! string unless set otherwise.
//!
//! ## Values
//!
//! Keys and values are trimmed, then read in one of two ways:
//!
//! - **Quoted**: text wrapped in matching `"` or `'` is parsed as a JSON literal
//!   (single quotes are stripped first), so `"a;b"` is the string `a;b` and `'5'`
//!   is the number 5. Text that is not valid JSON is kept as it is.
//! - **Plain**: the first unescaped `;` or `#` starts a comment, wherever it
//!   appears. `\;`, `\#` and `\\` stand for the literal character; any other
//!   backslash is kept as written.
//!
//! ```text
//! plain = x ; comment        -> "x"
//! tight = x;y                -> "x"
//! escaped = a\;b             -> "a;b"
//! quoted = "a = b ; c"       -> "a = b ; c"
//! path = C:\dir\file         -> "C:\dir\file"
//! ```
//!
//! The strings `true`, `True`, `TRUE`, `false`, `False`, `FALSE` and `null` are
//! read as booleans and null. Nothing else is converted.
//!
//! # Sections
//!
//! `[a.b.c]` addresses the section `c` inside `b` inside `a`. Dots escaped with
//! a backslash belong to the name: `[x\.y]` is one section called `x.y`. A
//! literal backslash in a section name is written `\\\\`, since the header text is
//! unescaped once as a key and once as a path (`[a\\\\.b]` is `b` inside `a\`).
//! Sections may appear in any order; a child written before its parent is merged
//! into it.
//!
//! ```text
//! [a]
//! b=1
//! [a.c]
//! d=2
//! ```
//!
//! decodes to `{a: {b: "1", c: {d: "2"}}}`. Dots in plain keys are never split:
//! `a.b=1` is the key `a.b`, and it lives next to a section `[a.b]` without
//! touching it. A section does replace a plain entry of the same name at the
//! same level: `a=1` followed by `[a]` leaves only the section `a`.
//!
//! # Arrays
//!
//! A key ending in `[]` appends to a list:
//!
//! ```text
//! ar[]=one
//! ar[]=two
//! ```
//!
//! With inline arrays enabled, repeating a plain key does the same. A key that
//! already holds a list is always appended to, even without the brackets.
//!
//! # Reserved Names
//!
//! The name `__proto__` is never stored: not as a key, not as an array key, not
//! as a section, not as a path segment. Entries below a reserved section header
//! are discarded.
//!
//! # Writing
//!
//! - Plain entries first, then arrays in place, then child sections.
//! - Child sections get the full dotted path of their parent: `[log.level]`.
//! - A section with no plain entries gets no header (unless it is empty and
//!   empty sections are allowed), but its children are still written.
//! - Blocks are separated by one blank line; there is never a leading or
//!   trailing blank line.
//! - Strings that would be misread are written as JSON literals; `;` and `#`
//!   in plain strings are escaped.
//!
//! # Limitations
//!
//! - **No types**: numbers come back as strings; use the typed API
//!   ([`crate::from_str`]) to parse them into fields.
//! - **Nested lists**: arrays hold scalars; nested arrays and sections inside an
//!   array are written as JSON literals.
//! - **Comments**: dropped on decode and never written.

// This module contains only documentation; no implementation code
