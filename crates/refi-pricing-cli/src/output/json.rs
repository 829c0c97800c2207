use serde_json::Value;
use std::io::{self, Write};

/// Pretty JSON on stdout, newline-terminated for shell pipelines.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_json(&mut out, value) {
        eprintln!("failed to write JSON: {}", e);
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}
