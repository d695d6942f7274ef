//! Terminal rendering of normalized records.

use serde_json::Value;
use std::io::{self, Write};

/// How records are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned `key: value` lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Output sink for records and option guidance
pub struct RecordPrinter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> RecordPrinter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Write a record followed by a blank separator line.
    pub fn print_record(&mut self, record: &Value) -> io::Result<()> {
        self.print(record)?;
        writeln!(self.out)
    }

    /// Write a record with no trailing separator.
    pub fn print(&mut self, record: &Value) -> io::Result<()> {
        let rendered = match self.format {
            OutputFormat::Text => format_record(record),
            OutputFormat::Json => {
                serde_json::to_string_pretty(record).map_err(io::Error::from)?
            }
        };
        writeln!(self.out, "{}", rendered)
    }

    /// Tell the user which values `category` accepts.
    pub fn print_guidance(&mut self, category: &str, allowed: &[&str]) -> io::Result<()> {
        writeln!(self.out, "Wrong {} occurred", category)?;
        writeln!(self.out, "Input correct {}: {}", category, allowed.join(", "))
    }
}

/// Render a record as `key: value` lines, keys padded to a common width.
///
/// Strings print raw; any other value prints as compact JSON.
pub fn format_record(record: &Value) -> String {
    let Value::Object(fields) = record else {
        return one_line(record);
    };

    if fields.is_empty() {
        return "{}".to_string();
    }

    let width = fields.keys().map(|k| k.chars().count()).max().unwrap_or(0) + 1;

    fields
        .iter()
        .map(|(key, value)| {
            format!("{:<width$} {}", format!("{}:", key), one_line(value), width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn one_line(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_record_aligns_keys() {
        let record = json!({"id": 1, "title": "Cowboy Bebop", "mean": 8.75, "nsfw": "white"});

        assert_eq!(
            format_record(&record),
            "id:    1\ntitle: Cowboy Bebop\nmean:  8.75\nnsfw:  white"
        );
    }

    #[test]
    fn test_format_record_empty() {
        assert_eq!(format_record(&json!({})), "{}");
    }

    #[test]
    fn test_format_non_string_values_as_json() {
        let record = json!({"rank": null, "tags": ["a", "b"]});
        assert_eq!(format_record(&record), "rank: null\ntags: [\"a\",\"b\"]");
    }

    #[test]
    fn test_print_guidance() {
        let mut out = Vec::new();
        let mut printer = RecordPrinter::new(&mut out, OutputFormat::Text);
        printer
            .print_guidance("ranking type", &["all", "airing"])
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Wrong ranking type occurred\nInput correct ranking type: all, airing\n"
        );
    }

    #[test]
    fn test_json_format() {
        let mut out = Vec::new();
        let mut printer = RecordPrinter::new(&mut out, OutputFormat::Json);
        printer.print_record(&json!({"id": 1})).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"id\": 1\n}\n\n");
    }
}
