use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_as_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects become key/value rows, arrays of objects become one row per item
/// with the union of their keys as columns.
fn render_as_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let rendered = match serde_json::to_value(value)? {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers = Vec::<String>::new();
            for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
            let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| map.get(h).map_or_else(|| String::from("-"), cell))
                        .collect::<Vec<String>>()
                })
                .collect::<Vec<_>>();
            table::render_table(&header_refs, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell(&scalar)]], options),
    };
    Ok(rendered)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.replace('\n', " "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, render_as_table, table::TableOptions};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        seconds: f64,
    }

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_render_is_valid_json() {
        let value = Sample { name: "full", seconds: 1.5 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["name"], "full");
        assert_eq!(parsed["seconds"], 1.5);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Sample { name: "full", seconds: 1.5 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_renders_key_value_rows() {
        let value = serde_json::json!({ "status": "failed", "message": "Upload failed.", "preview": null });
        let out = render_as_table(&value, PLAIN).unwrap();
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("Upload failed."));
        assert!(out.lines().any(|l| l.starts_with("preview") && l.trim_end().ends_with('-')));
    }

    #[test]
    fn array_of_objects_renders_columns() {
        let value = vec![
            Sample { name: "full", seconds: 1.5 },
            Sample { name: "partial", seconds: 2.0 },
        ];
        let out = render_as_table(&value, PLAIN).unwrap();
        let header = out.lines().next().unwrap();
        assert!(header.contains("name") && header.contains("seconds"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_array_has_placeholder() {
        let value: Vec<Sample> = Vec::new();
        assert_eq!(render_as_table(&value, PLAIN).unwrap(), "(no rows)");
    }
}
