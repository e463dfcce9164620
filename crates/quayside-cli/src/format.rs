//! Result presentation.
//!
//! [`OutputFormat`] is the user-facing choice between the four views; the
//! [`Formatter`] renders matched records into any writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use quayside::Record;
use serde_json::Value as Json;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 30;

/// How query results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Name and type of the first match, plus a count of the rest
    #[default]
    Simple,
    /// Every field of every match
    Detailed,
    /// One row per match, one column per field
    Table,
    /// Pretty-printed JSON written to the output file
    Json,
}

impl OutputFormat {
    /// All formats, in the order they are offered.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Simple,
        OutputFormat::Detailed,
        OutputFormat::Table,
        OutputFormat::Json,
    ];

    /// Returns the name typed by the user for this format.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Detailed => "detailed",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    /// Looks a format up by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders matched records.
#[derive(Debug, Clone)]
pub struct Formatter {
    /// Field shown as the record name in the simple view.
    pub name_field: String,
    /// Field shown as the record type in the simple view.
    pub type_field: String,
    /// File the JSON view writes to.
    pub json_path: PathBuf,
}

impl Formatter {
    pub fn new(
        name_field: impl Into<String>,
        type_field: impl Into<String>,
        json_path: impl Into<PathBuf>,
    ) -> Self {
        Formatter {
            name_field: name_field.into(),
            type_field: type_field.into(),
            json_path: json_path.into(),
        }
    }

    /// Writes `records` to `out` in the requested format.
    ///
    /// The JSON format writes its payload to [`Formatter::json_path`] and only
    /// reports the file on `out`.
    pub fn display<W: Write>(
        &self,
        records: &[&Record],
        format: OutputFormat,
        out: &mut W,
    ) -> Result<()> {
        if records.is_empty() {
            writeln!(out, "No records found matching the query.")?;
            return Ok(());
        }

        writeln!(out, "\nFound {} matching records", records.len())?;

        match format {
            OutputFormat::Simple => self.simple(records, out),
            OutputFormat::Detailed => detailed(records, out),
            OutputFormat::Table => table(records, out),
            OutputFormat::Json => self.json(records, out),
        }
    }

    fn simple<W: Write>(&self, records: &[&Record], out: &mut W) -> Result<()> {
        let first = records[0];
        let field = |name: &str| {
            first
                .get(name)
                .map_or_else(|| "Unknown".to_string(), display_value)
        };

        writeln!(out, "\nRecord Information:")?;
        writeln!(out, "{}", "-".repeat(50))?;
        writeln!(out, "Name: {}", field(self.name_field.as_str()))?;
        writeln!(out, "Type: {}", field(self.type_field.as_str()))?;
        if records.len() > 1 {
            writeln!(out, "\n... and {} more records", records.len() - 1)?;
        }
        Ok(())
    }

    fn json<W: Write>(&self, records: &[&Record], out: &mut W) -> Result<()> {
        let file = File::create(&self.json_path)
            .with_context(|| format!("failed to create {}", self.json_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)
            .with_context(|| format!("failed to write {}", self.json_path.display()))?;
        writer.flush()?;

        writeln!(
            out,
            "Saved {} records to {}",
            records.len(),
            self.json_path.display()
        )?;
        Ok(())
    }
}

fn detailed<W: Write>(records: &[&Record], out: &mut W) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        writeln!(out, "\nRecord {}/{}:", i + 1, records.len())?;
        writeln!(out, "{}", "-".repeat(80))?;

        let mut fields: Vec<(&String, &Json)> = record.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in fields {
            writeln!(out, "{key}: {}", display_value(value))?;
        }
    }
    Ok(())
}

fn table<W: Write>(records: &[&Record], out: &mut W) -> Result<()> {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|col| {
                    let text = record.get(*col).map(display_value).unwrap_or_default();
                    truncate_to_width(&text, MAX_CELL_WIDTH)
                })
                .collect()
        })
        .collect();

    let headers: Vec<String> = columns
        .iter()
        .map(|col| truncate_to_width(col, MAX_CELL_WIDTH))
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, &headers, &widths)?;
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(total))?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

/// Renders a field value for display: strings bare, everything else as JSON.
fn display_value(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

/// Truncates a string to a display width, ending it with `…` when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve 1 column for the ellipsis
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Record> {
        [
            json!({"Z01_CURRENT_NAME": "Vessel 1", "P36_VESSEL_TYPE": "Tanker", "Z13_STATUS_CODE": 4}),
            json!({"Z01_CURRENT_NAME": "Vessel 2", "BUILDER_GROUP": "Other Builder"}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
    }

    fn formatter() -> Formatter {
        Formatter::new("Z01_CURRENT_NAME", "P36_VESSEL_TYPE", "results.json")
    }

    fn render(records: &[&Record], format: OutputFormat) -> String {
        let mut out = Vec::new();
        formatter().display(records, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_name("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_name(" json "), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("xml"), None);
        assert_eq!(OutputFormat::Detailed.to_string(), "detailed");
    }

    #[test]
    fn empty_results() {
        assert_eq!(
            render(&[], OutputFormat::Simple),
            "No records found matching the query.\n"
        );
    }

    #[test]
    fn simple_view() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let text = render(&refs, OutputFormat::Simple);

        assert!(text.contains("Found 2 matching records"));
        assert!(text.contains("Name: Vessel 1"));
        assert!(text.contains("Type: Tanker"));
        assert!(text.contains("... and 1 more records"));
    }

    #[test]
    fn simple_view_unknown_fields() {
        let data = records();
        let text = render(&[&data[1]], OutputFormat::Simple);
        assert!(text.contains("Type: Unknown"));
        assert!(!text.contains("more records"));
    }

    #[test]
    fn detailed_view_sorts_keys() {
        let data = records();
        let text = render(&[&data[0]], OutputFormat::Detailed);

        assert!(text.contains("Record 1/1:"));
        let p36 = text.find("P36_VESSEL_TYPE: Tanker").unwrap();
        let z01 = text.find("Z01_CURRENT_NAME: Vessel 1").unwrap();
        let z13 = text.find("Z13_STATUS_CODE: 4").unwrap();
        assert!(p36 < z01 && z01 < z13);
    }

    #[test]
    fn table_view_aligns_columns() {
        let data = records();
        let refs: Vec<&Record> = data.iter().collect();
        let text = render(&refs, OutputFormat::Table);
        let lines: Vec<&str> = text.lines().skip_while(|l| !l.starts_with("Z01")).collect();

        assert_eq!(
            lines[0],
            "Z01_CURRENT_NAME  P36_VESSEL_TYPE  Z13_STATUS_CODE  BUILDER_GROUP"
        );
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "Vessel 1          Tanker           4");
        assert_eq!(lines[3], "Vessel 2                                            Other Builder");
    }

    #[test]
    fn json_view_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let formatter = Formatter::new("n", "t", &path);
        let data = records();

        let mut out = Vec::new();
        formatter
            .display(&[&data[1]], OutputFormat::Json, &mut out)
            .unwrap();

        let written: Json = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!([{"Z01_CURRENT_NAME": "Vessel 2", "BUILDER_GROUP": "Other Builder"}]));
        assert!(String::from_utf8(out).unwrap().contains("Saved 1 records"));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
    }
}
