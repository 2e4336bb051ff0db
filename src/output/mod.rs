//! Output module

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::api::ApiResponse;

/// Write the raw response body, or a status message when it is empty
pub fn print_response(response: &ApiResponse) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(&response.render())?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}

/// Print a message about how the CLI was used
pub fn usage(msg: &str) {
    println!("{}", msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
