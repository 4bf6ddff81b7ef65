//! Using the ini! macro to build documents inline.
//!
//! Run with: cargo run --example macro

use serde_ini::{encode, ini, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = ini!({
        "scope": "global",
        "database": {
            "user": "dbuser",
            "password": "dbpassword",
            "database": "use_this_database"
        },
        "paths": {
            "default": {
                "datadir": "/var/lib/data",
                "array": ["first value", "second value", "third value"]
            }
        }
    });

    let section = doc.as_section().ok_or("ini! object is always a section")?;
    println!("{}", encode(section));

    let datadir = doc
        .get("paths")
        .and_then(|p| p.get("default"))
        .and_then(|d| d.get("datadir"))
        .and_then(Value::as_str);
    println!("paths.default.datadir = {:?}", datadir);

    Ok(())
}
