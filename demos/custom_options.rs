//! Customizing INI output and input with EncodeOptions and DecodeOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_ini::{
    decode_with_options, to_string, to_string_with_options, DecodeOptions, EncodeOptions,
    LineEnding, Value,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    homepage: String,
    mirrors: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0".to_string(),
        homepage: "https://example.com/#readme".to_string(),
        mirrors: vec!["eu".to_string(), "us".to_string()],
    };

    println!("Default:");
    println!("{}", to_string(&config)?);

    println!("Whitespace, inline arrays, under [app]:");
    let options = EncodeOptions::from("app")
        .with_whitespace(true)
        .with_inline_arrays(true);
    println!("{}", to_string_with_options(&config, &options)?);

    println!("Quoted version, exact values, CRLF:");
    let options = EncodeOptions::new()
        .with_force_stringify_keys(["version"])
        .with_exact_value(true)
        .with_line_ending(LineEnding::CrLf);
    println!("{:?}\n", to_string_with_options(&config, &options)?);

    // Reading: bare keys become true, repeated keys collect, values are verbatim
    let options = DecodeOptions::new()
        .with_default_value(true)
        .with_inline_arrays(true)
        .with_exact_value(true);
    let doc = decode_with_options("verbose\nurl = http://x/#top\nmirror = eu\nmirror = us\n", &options);
    println!("verbose = {:?}", doc.get("verbose").and_then(Value::as_bool));
    println!("url     = {:?}", doc.get("url").and_then(Value::as_str));
    println!("mirror  = {:?}", doc.get("mirror"));

    Ok(())
}
