//! Working with Value and IniMap at runtime.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_ini::{decode, encode, from_value, to_value, IniMap, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = decode("host = localhost\nport = 8080\ndebug = true\n");

    // Everything except true/false/null decodes as text
    if let Some(Value::String(host)) = doc.get("host") {
        println!("host: {}", host);
    }
    let port = doc.get("port").cloned().map(i64::try_from).transpose()?;
    println!("port: {:?}", port);
    println!("debug: {:?}\n", doc.get("debug").and_then(Value::as_bool));

    // Build a section by hand and attach it
    let mut features = IniMap::new();
    features.insert(
        "enabled".to_string(),
        Value::Array(vec![Value::from("auth"), Value::from("logging")]),
    );
    doc.insert("features".to_string(), Value::Section(features));
    println!("Document:\n{}", encode(&doc));

    // Convert a struct to a Value and back
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };
    let value = to_value(&user)?;
    println!("User is a section: {}", value.is_section());
    let back: User = from_value(value)?;
    println!("Back again: {:?}", back);

    Ok(())
}
