//! Delimited-text parsing helpers.
//!
//! The tokenizer is a small hand-rolled state machine over one line of
//! delimited text: double quotes open a quoted field, `""` inside quotes
//! is a literal quote, and a delimiter inside quotes is literal field
//! content. [`parse_table`] layers header-driven, type-inferring table
//! ingestion on top of it.

use crate::rowset::error::{TableError, TableResult};
use crate::rowset::table::{Column, Row, Schema, Table};
use crate::rowset::types::{parse_timestamp_str, CellType, CellValue};
use chrono::NaiveDate;
use log::warn;

/// Options for delimited-text parsing
#[derive(Debug, Clone)]
pub struct DelimitedOptions {
    pub delimiter: char,
    pub has_header: bool,
    /// Token treated as NULL (case-insensitive), e.g. `NULL` or `\N`
    pub null_token: Option<String>,
    pub trim_fields: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            null_token: None,
            trim_fields: true,
        }
    }
}

/// Split one line of delimited text into unquoted fields
///
/// Quoting rules: a field starting with `"` is quoted until the matching
/// closing quote; `""` inside a quoted field is a literal quote; the
/// delimiter inside quotes is literal content. An unterminated quote is a
/// `ParseError` carrying the position of the opening quote.
///
/// ```rust
/// use rowset::rowset::text::split_delimited;
///
/// let fields = split_delimited("a,\"b,c\",\"d\"\"e\"", ',').unwrap();
/// assert_eq!(fields, vec!["a", "b,c", "d\"e"]);
/// ```
pub fn split_delimited(line: &str, delimiter: char) -> TableResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_start = 0usize;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if in_quotes {
            if c == '"' {
                if matches!(chars.peek(), Some((_, '"'))) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
            quote_start = pos;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        return Err(TableError::parse_error(
            "unterminated quoted field",
            Some(quote_start),
        ));
    }

    fields.push(field);
    Ok(fields)
}

/// Join fields into one line of delimited text, quoting only when needed
///
/// Inverse of [`split_delimited`]: fields containing the delimiter, a
/// quote, or a line break are quoted, with internal quotes doubled.
pub fn join_delimited(fields: &[String], delimiter: char) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        let needs_quoting = field.contains(delimiter)
            || field.contains('"')
            || field.contains(&['\r', '\n'][..]);
        if needs_quoting {
            out.push('"');
            for c in field.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out
}

/// Clean a numeric-looking literal for parsing
///
/// Strips currency symbols, digit grouping, percent signs, BOM, and
/// non-breaking spaces; `(n)` reads as negative. Returns the cleaned
/// literal and whether it carries a fractional part, or `None` when the
/// input is not numeric-shaped.
pub fn normalize_numeric(s: &str) -> Option<(String, bool)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let (inner, neg) = if s.starts_with('(') && s.ends_with(')') && s.len() > 2 {
        (&s[1..s.len() - 1], true)
    } else {
        (s, false)
    };

    let mut cleaned = String::with_capacity(inner.len() + 1);
    for c in inner.chars() {
        match c {
            '$' | ',' | '%' | '\u{FEFF}' | '\u{00A0}' => {}
            _ => cleaned.push(c),
        }
    }

    if cleaned.is_empty() {
        return None;
    }

    if neg {
        cleaned.insert(0, '-');
    }

    let mut has_decimal = false;
    for (idx, ch) in cleaned.chars().enumerate() {
        match ch {
            '-' if idx == 0 => {}
            '.' => {
                if has_decimal {
                    return None;
                }
                has_decimal = true;
            }
            '0'..='9' => {}
            _ => return None,
        }
    }

    // A bare "-" or "." is not a number
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((cleaned, has_decimal))
}

/// Parse one field into a typed cell, best effort
///
/// Empty input is `Null`; then boolean, integer, numeric-shaped float,
/// ISO date, and ISO timestamp literals are tried in order; anything
/// else stays a string.
pub fn parse_cell(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => return CellValue::Boolean(true),
        "false" => return CellValue::Boolean(false),
        _ => {}
    }
    if let Some((cleaned, has_decimal)) = normalize_numeric(trimmed) {
        if !has_decimal {
            if let Ok(i) = cleaned.parse::<i64>() {
                return CellValue::Integer(i);
            }
        }
        if let Ok(f) = cleaned.parse::<f64>() {
            return CellValue::Float(f);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    if let Some(ts) = parse_timestamp_str(trimmed) {
        return CellValue::Timestamp(ts);
    }
    CellValue::String(s.to_string())
}

/// Strictly parse a delimited list of integers, e.g. `"1, 2, 3"`
///
/// No quoting layer here: the list is split on the bare delimiter. Empty
/// segments and non-integer tokens are `ParseError`s carrying the offset
/// of the offending segment.
pub fn parse_i64_list(s: &str, delimiter: char) -> TableResult<Vec<i64>> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for segment in s.split(delimiter) {
        let token = segment.trim();
        if token.is_empty() {
            return Err(TableError::parse_error("empty integer segment", Some(offset)));
        }
        let value = token.parse::<i64>().map_err(|_| {
            TableError::parse_error(format!("invalid integer '{}'", token), Some(offset))
        })?;
        out.push(value);
        offset += segment.chars().count() + 1;
    }
    Ok(out)
}

/// Widen two inferred column types to their common type
///
/// Integer widens to Float; everything else degrades to String when
/// mixed.
fn widen(a: CellType, b: CellType) -> CellType {
    if a == b {
        return a;
    }
    match (a, b) {
        (CellType::Integer, CellType::Float) | (CellType::Float, CellType::Integer) => {
            CellType::Float
        }
        (CellType::Date, CellType::Timestamp) | (CellType::Timestamp, CellType::Date) => {
            CellType::Timestamp
        }
        _ => CellType::String,
    }
}

/// Parse delimited text into a typed table
///
/// Column names come from the header row (or are synthesized as
/// `column_1..n`), column types are inferred per column from the parsed
/// cells and widened where rows disagree, and every column is nullable.
/// Rows shorter than the header are rejected with a `ParseError` naming
/// the line; rows longer than the header drop their extra fields with a
/// warning.
pub fn parse_table(name: &str, input: &str, options: &DelimitedOptions) -> TableResult<Table> {
    let null_token = options.null_token.as_deref();
    let mut lines = input
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let mut header: Option<Vec<String>> = None;
    // (raw text, parsed cell) per field, per row
    let mut parsed_rows: Vec<Vec<(String, CellValue)>> = Vec::new();

    if options.has_header {
        if let Some((_, line)) = lines.next() {
            let mut names = split_delimited(line, options.delimiter)?;
            if options.trim_fields {
                names = names.iter().map(|n| n.trim().to_string()).collect();
            }
            header = Some(names);
        }
    }

    for (line_no, line) in lines {
        let mut fields = split_delimited(line, options.delimiter)?;
        if options.trim_fields {
            fields = fields.iter().map(|f| f.trim().to_string()).collect();
        }

        if header.is_none() {
            // First data row fixes the width when there is no header
            header = Some(
                (1..=fields.len())
                    .map(|i| format!("column_{}", i))
                    .collect(),
            );
        }
        let columns = header.as_ref().map(|names| names.len()).unwrap_or(0);

        if fields.len() < columns {
            return Err(TableError::parse_error(
                format!(
                    "line {}: expected {} fields, got {}",
                    line_no + 1,
                    columns,
                    fields.len()
                ),
                None,
            ));
        }
        if fields.len() > columns {
            warn!(
                "parse_table '{}': line {} has {} fields, keeping first {}",
                name,
                line_no + 1,
                fields.len(),
                columns
            );
            fields.truncate(columns);
        }

        let cells = fields
            .into_iter()
            .map(|raw| {
                let is_null = null_token
                    .map(|t| raw.trim().eq_ignore_ascii_case(t))
                    .unwrap_or(false);
                let cell = if is_null { CellValue::Null } else { parse_cell(&raw) };
                (raw, cell)
            })
            .collect();
        parsed_rows.push(cells);
    }

    let names = header.unwrap_or_default();

    // Per-column type inference over the parsed cells
    let mut column_types: Vec<Option<CellType>> = vec![None; names.len()];
    for row in &parsed_rows {
        for (idx, (_, cell)) in row.iter().enumerate() {
            if let Some(cell_type) = cell.cell_type() {
                column_types[idx] = Some(match column_types[idx] {
                    None => cell_type,
                    Some(current) => widen(current, cell_type),
                });
            }
        }
    }

    let schema = Schema::new(
        names
            .iter()
            .zip(&column_types)
            .map(|(name, ty)| Column::nullable(name.clone(), ty.unwrap_or(CellType::String)))
            .collect(),
    );
    let mut table = Table::new(name, schema);

    for cells in parsed_rows {
        let mut row = Row::new();
        for ((name, ty), (raw, cell)) in names.iter().zip(&column_types).zip(cells) {
            let value = match (ty, cell) {
                (_, CellValue::Null) => CellValue::Null,
                // String columns keep the raw field text
                (Some(CellType::String), _) => CellValue::String(raw),
                (Some(ty), cell) => cell.cast_to(*ty)?,
                (None, cell) => cell,
            };
            row.set(name.clone(), value);
        }
        table.insert(row)?;
    }

    Ok(table)
}
