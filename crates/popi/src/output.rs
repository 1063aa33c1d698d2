// SPDX-License-Identifier: MIT OR Apache-2.0

use libpopi::{Error, Verbosity, expand};
use serde::Serialize;

use crate::exit_code::ExitCode;

/// Generic JSON output wrapper for CLI responses.
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn to_json<T: Serialize>(output: &JsonOutput<T>) -> Result<String, Error> {
    serde_json::to_string_pretty(output)
        .map_err(|e| Error::other(format!("failed to serialize output: {e}")))
}

pub fn output_json<T: Serialize>(data: T) -> Result<ExitCode, Error> {
    println!("{}", to_json(&JsonOutput::ok(data))?);
    Ok(ExitCode::Success)
}

pub fn output_error(json: bool, color: bool, msg: &str) {
    if json {
        let output: JsonOutput<()> = JsonOutput::err(msg);
        match to_json(&output) {
            Ok(line) => println!("{line}"),
            Err(_) => println!("{{\"success\":false}}"),
        }
    } else {
        eprintln!("{} {msg}", expand("<b>error:<reset>", color));
    }
}

pub fn print_info(verbosity: Verbosity, color: bool, msg: &str) {
    if verbosity != Verbosity::Quiet {
        println!("{} {msg}", expand("<b>info:<reset>", color));
    }
}
