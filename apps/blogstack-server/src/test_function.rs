//! Offline evaluation of the viewer-request function.
//!
//! Mirrors the CDN's "test function" facility: given a viewer-request event
//! as JSON, print the request the function would forward.

use std::path::Path;

use anyhow::{Context, Result};

/// Flag selecting this mode.
pub const FLAG: &str = "--test-function";

/// Find the event file argument following [`FLAG`], if the flag is present.
pub fn event_path_from_args(args: &[String]) -> Option<Result<&str>> {
    let pos = args.iter().position(|a| a == FLAG)?;
    Some(
        args.get(pos + 1)
            .map(String::as_str)
            .with_context(|| format!("{FLAG} requires a path to an event JSON file")),
    )
}

/// Read an event file and return the function output as pretty JSON.
pub fn run(path: &Path) -> Result<String> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read event file {}", path.display()))?;
    blogstack_edge::handle_event_json(&json)
        .with_context(|| format!("cannot evaluate event in {}", path.display()))
}
