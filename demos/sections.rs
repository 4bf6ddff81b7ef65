//! Nested sections, escaped dots and arrays.
//!
//! Run with: cargo run --example sections

use serde_ini::{decode, encode, Value};

const TEXT: &str = r"
[a]
b = 1

; a child section may come before or after its parent
[a.c]
d = 2

; an escaped dot belongs to the name
[x\.y]
key = literal dot

[x\.y.z]
key = child of x.y

[lists]
colors[] = red
colors[] = green
colors = blue
";

fn main() {
    let doc = decode(TEXT);

    let d = doc
        .get("a")
        .and_then(|a| a.get("c"))
        .and_then(|c| c.get("d"));
    println!("a.c.d = {:?}", d);

    let xy = doc.get("x.y").and_then(|s| s.get("key"));
    println!("x.y.key = {:?}", xy);

    if let Some(Value::Array(colors)) = doc.get("lists").and_then(|l| l.get("colors")) {
        println!("lists.colors has {} items", colors.len());
    }

    println!("\nRe-encoded:\n{}", encode(&doc));
}
