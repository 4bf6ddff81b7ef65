//! Basic INI decoding, encoding and typed round trips.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ini::{decode, encode, from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    user: String,
    password: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    scope: String,
    database: Database,
}

const TEXT: &str = "\
; this comment is being ignored
scope = global

[database]
user = dbuser
password = dbpassword
port = 5432
";

fn main() -> Result<(), Box<dyn Error>> {
    // Untyped: text in, document out
    let doc = decode(TEXT);
    println!("Decoded document: {:?}\n", doc);
    println!("Re-encoded:\n{}", encode(&doc));

    // Typed: parse straight into structs
    let config: Config = from_str(TEXT)?;
    println!("Typed config: {:?}\n", config);

    let text = to_string(&config)?;
    let back: Config = from_str(&text)?;
    assert_eq!(config, back);
    println!("✓ Round-trip successful");

    Ok(())
}
