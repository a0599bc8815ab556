//! Stdin/stdout handling for CLI
//!
//! - Input: raw text (queries) or a JSON filter list, via stdin
//! - Output: a single JSON object, or query text for `render`
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use crate::compiler::Diagnostics;

use super::errors::CliResult;

/// Read all of stdin as text
pub fn read_input() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write a compile failure with every row diagnostic to stdout
pub fn write_diagnostics(code: &str, diagnostics: &Diagnostics) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": diagnostics.to_string(),
        "diagnostics": diagnostics
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write raw text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;

    Ok(())
}
