//! HTML diagram rendering.
//!
//! The diagram is a fixed page template with a single data marker. The
//! marker line is replaced by JavaScript assignments describing every
//! thread's slices; everything else is copied through unchanged.

use crate::{TraceData, TraceError};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Line marker in the template where trace data is inserted.
pub const DATA_MARKER: &str = "//INSERTDATA";

const TEMPLATE: &str = include_str!("../assets/template.html");

/// Render `data` into the diagram template.
pub fn render_html(data: &TraceData) -> String {
    let mut out = String::with_capacity(TEMPLATE.len() + data.threads.len() * 256);

    for line in TEMPLATE.lines() {
        if line.contains(DATA_MARKER) {
            write_data(&mut out, data);
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Render `data` and write it to `path`.
pub fn write_html(path: impl AsRef<Path>, data: &TraceData) -> Result<(), TraceError> {
    let path = path.as_ref();
    std::fs::write(path, render_html(data)).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), threads = data.threads.len(), "Wrote trace diagram");
    Ok(())
}

fn write_data(out: &mut String, data: &TraceData) {
    // Writing into a String cannot fail.
    for (i, thread) in data.threads.iter().enumerate() {
        let durations = join(thread.slices.iter().map(|s| s.duration.to_string()));
        let types = join(thread.slices.iter().map(|s| s.type_tag.as_u32().to_string()));

        let _ = writeln!(out, "    durations[{i}] = [{durations}];");
        let _ = writeln!(out, "    types[{i}] = [{types}];");
        let _ = writeln!(out, "    threadnames[{i}] = {};", js_string(&thread.name));
    }

    let names = join(data.type_names.iter().map(|n| js_string(n)));
    let _ = writeln!(out, "    typenames = [{names}];");
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Quote `s` as a JavaScript string literal that is safe inside a script tag.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("Producer"), "\"Producer\"");
        assert_eq!(js_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(js_string("</script>"), "\"\\u003c/script\\u003e\"");
        assert_eq!(js_string("x\u{1}"), "\"x\\u0001\"");
    }

    #[test]
    fn test_template_has_exactly_one_marker() {
        assert_eq!(TEMPLATE.matches(DATA_MARKER).count(), 1);
    }
}
