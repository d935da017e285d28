use serde_json::{Number, Value, json};
use std::io::Write;

use crate::catalog::ColorEntry;
use crate::search::MatchResult;
use crate::util::rounded_micros;

const TAG_SEPARATOR: &str = ";";

#[derive(Debug)]
struct EntryRow<'a> {
    hex: &'a str,
    name: &'a str,
    family: &'a str,
    tags: String,
}

impl<'a> EntryRow<'a> {
    fn new(entry: &'a ColorEntry) -> Self {
        Self {
            hex: entry.hex(),
            name: entry.name().unwrap_or_default(),
            family: entry.family().unwrap_or_default(),
            tags: entry.tags().join(TAG_SEPARATOR),
        }
    }
}

pub fn write_entries_csv<W: Write>(writer: W, entries: &[&ColorEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["hex", "name", "family", "tags"])?;
    for entry in entries {
        let row = EntryRow::new(entry);
        wtr.write_record([row.hex, row.name, row.family, row.tags.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_matches_csv<W: Write>(writer: W, matches: &[MatchResult<'_>]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["hex", "name", "family", "tags", "distance"])?;
    for m in matches {
        let row = EntryRow::new(m.entry);
        let distance = format!("{:.6}", m.distance);
        wtr.write_record([row.hex, row.name, row.family, row.tags.as_str(), distance.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_entries_json<W: Write>(writer: W, entries: &[&ColorEntry]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, entries)?;
    Ok(())
}

pub fn write_matches_json<W: Write>(writer: W, matches: &[MatchResult<'_>]) -> anyhow::Result<()> {
    let rows: Vec<Value> = matches
        .iter()
        .map(|m| {
            json!({
                "hex": m.entry.hex(),
                "name": m.entry.name(),
                "family": m.entry.family(),
                "tags": m.entry.tags(),
                "distance": rounded_number_json(m.distance),
            })
        })
        .collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}

fn rounded_number_json(value: f64) -> Value {
    // Keep parity with CSV output: 6 fractional digits, rounded.
    let rounded = rounded_micros(value);
    Number::from_f64(rounded).map_or_else(|| Value::String(format!("{rounded}")), Value::Number)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn render_rows(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    push_line(&mut out, header.iter().copied(), &widths);
    for row in rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

/// Aligned plain-text table for terminals.
pub fn render_entries_table(entries: &[&ColorEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let row = EntryRow::new(entry);
            vec![
                row.hex.to_string(),
                row.name.to_string(),
                row.family.to_string(),
                row.tags,
            ]
        })
        .collect();
    render_rows(&["HEX", "NAME", "FAMILY", "TAGS"], &rows)
}

pub fn render_matches_table(matches: &[MatchResult<'_>]) -> String {
    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|m| {
            let row = EntryRow::new(m.entry);
            vec![
                row.hex.to_string(),
                row.name.to_string(),
                row.family.to_string(),
                format!("{:.3}", m.distance),
            ]
        })
        .collect();
    render_rows(&["HEX", "NAME", "FAMILY", "DISTANCE"], &rows)
}
