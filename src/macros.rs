/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become sections, so a whole document can be written inline and
/// passed to [`encode`](crate::encode) through [`Value::as_section`](crate::Value::as_section).
///
/// ```rust
/// use serde_ini::{ini, Value};
///
/// let doc = ini!({
///     "name": "demo",
///     "tags": ["a", "b"],
///     "log": { "level": "debug" }
/// });
/// assert!(doc.get("log").map_or(false, Value::is_section));
/// ```
#[macro_export]
macro_rules! ini {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::ini!($elem)),*])
    };

    ({}) => {
        $crate::Value::Section($crate::IniMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut section = $crate::IniMap::new();
        $(
            section.insert($key.to_string(), $crate::ini!($value));
        )*
        $crate::Value::Section(section)
    }};

    // Anything else goes through serde.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
