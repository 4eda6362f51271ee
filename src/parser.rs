use std::{
    fs,
    path::Path,
};

use chrono::NaiveDate;
use tracing::{
    debug,
    info,
    warn,
};

use crate::core::{
    utils::parse_leading_int,
    ArchitectError,
    Level,
    Record,
    RecordId,
    RecordKind,
};

pub const DEFAULT_EXPORT_PREFIX: &str = "kanji_curriculum_export";

// Column positions in the curriculum sheet
const COL_LEVEL: usize = 0;
const COL_KIND: usize = 1;
const COL_ORDER: usize = 2;
const COL_GLYPH: usize = 3;
const COL_MEANING_PRIMARY: usize = 5;
const COL_MEANING_SECONDARY: usize = 6;
const COL_COMPONENTS: usize = 8;

/// Parses a curriculum sheet. Never fails: bad rows are dropped, bad numbers
/// fall back to defaults.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect();

    // A first row whose first cell is not a number is a header
    let start = match lines.first().and_then(|line| line.split(',').next()) {
        Some(first_cell) if parse_leading_int(first_cell).is_some() => 0,
        _ => 1,
    };

    let mut records = Vec::new();
    for (line_index, line) in lines.iter().enumerate().skip(start) {
        let row = parse_csv_row(line);
        match record_from_row(row, line_index) {
            Some(record) => records.push(record),
            None if !line.trim().is_empty() => debug!(line = line_index, "dropped row without a glyph"),
            None => {}
        }
    }

    info!(records = records.len(), header = start == 1, "parsed curriculum");
    records
}

fn record_from_row(row: Vec<String>, line_index: usize) -> Option<Record> {
    let glyph = row.get(COL_GLYPH).filter(|glyph| !glyph.is_empty())?.clone();
    let field = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

    let level = match parse_leading_int(field(COL_LEVEL)) {
        None | Some(0) => Level::MIN,
        Some(value) => {
            let level = Level::clamped(value);
            if i64::from(level.get()) != value {
                warn!(line = line_index, %glyph, value, %level, "level out of range, clamped");
            }
            level
        }
    };

    Some(Record {
        id: RecordId::from_row(&glyph, line_index),
        level,
        kind: RecordKind::from_field(field(COL_KIND)),
        order: parse_leading_int(field(COL_ORDER)).unwrap_or(0),
        meaning_primary: field(COL_MEANING_PRIMARY).to_string(),
        meaning_secondary: field(COL_MEANING_SECONDARY).to_string(),
        components: split_components(field(COL_COMPONENTS)),
        glyph,
        source_fields: row,
    })
}

/// Splits one line into trimmed cells. Double quotes toggle quoting and are
/// dropped; there is no escaped-quote handling.
pub fn parse_csv_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// `"木, 口"` splits on commas, `"木口"` splits per character.
pub fn split_components(field: &str) -> Vec<String> {
    if field.contains(',') {
        field
            .split(',')
            .map(str::trim)
            .filter(|component| !component.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        field.chars().filter(|c| !c.is_whitespace()).map(String::from).collect()
    }
}

/// Serializes the working set back into sheet form. Only level and order are
/// rewritten; every other cell is replayed from the source row.
pub fn export_csv(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| export_row(record).iter().map(|cell| format_cell(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn export_row(record: &Record) -> Vec<String> {
    let mut row = if record.source_fields.is_empty() {
        synthesize_row(record)
    } else {
        record.source_fields.clone()
    };

    if row.len() <= COL_ORDER {
        row.resize(COL_ORDER + 1, String::new());
    }
    row[COL_LEVEL] = record.level.to_string();
    row[COL_ORDER] = record.order.to_string();
    row
}

// Records built in code have no source row
fn synthesize_row(record: &Record) -> Vec<String> {
    let mut row = vec![String::new(); COL_COMPONENTS + 1];
    row[COL_KIND] = record.kind.to_string();
    row[COL_GLYPH] = record.glyph.clone();
    row[COL_MEANING_PRIMARY] = record.meaning_primary.clone();
    row[COL_MEANING_SECONDARY] = record.meaning_secondary.clone();
    row[COL_COMPONENTS] = record.components.join(",");
    row
}

// Embedded quotes are written as-is
fn format_cell(cell: &str) -> String {
    if cell.contains(',') {
        format!("\"{}\"", cell)
    } else {
        cell.to_string()
    }
}

pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

pub fn read_curriculum(path: &Path) -> Result<Vec<Record>, ArchitectError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_csv(&text))
}

pub fn write_curriculum(path: &Path, records: &[Record]) -> Result<(), ArchitectError> {
    if records.is_empty() {
        warn!(path = %path.display(), "exporting an empty curriculum");
    }
    fs::write(path, export_csv(records))?;
    info!(path = %path.display(), records = records.len(), "exported curriculum");
    Ok(())
}
