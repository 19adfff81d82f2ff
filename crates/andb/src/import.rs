// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # File import
//!
//! Loads delimited text files into an existing table: comma-separated CSV
//! or pipe-separated `.tbl` dumps. Each line becomes one row; fields are
//! parsed against the table's declared column types, an empty field is
//! Null, and blank lines are skipped.

use andb_catalog::{DataType, Datum, Row, TableDef};
use andb_ir::ImportFormat;
use andb_semantic::storage_type;

/// A malformed import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Picks the delimiter: explicit format wins, otherwise the file extension
/// (`.tbl` means pipes, anything else commas).
pub fn delimiter_for(path: &str, format: ImportFormat) -> char {
    match format {
        ImportFormat::Csv => ',',
        ImportFormat::Tbl => '|',
        ImportFormat::Auto => {
            if path.to_ascii_lowercase().ends_with(".tbl") {
                '|'
            } else {
                ','
            }
        }
    }
}

/// Parses file contents into rows shaped like `table`'s columns.
pub fn parse_rows(
    table: &TableDef,
    contents: &str,
    delimiter: char,
) -> Result<Vec<Row>, ImportError> {
    let columns = table.columns_in_order();
    let mut rows = vec![];

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        // .tbl dumps carry a trailing delimiter
        let line = line.strip_suffix(delimiter).unwrap_or(line);
        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != columns.len() {
            return Err(ImportError {
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    fields.len()
                ),
            });
        }

        let mut row = Row::with_arity(columns.len());
        for (ordinal, (field, column)) in fields.iter().zip(&columns).enumerate() {
            let target = storage_type(column.sql_type);
            row[ordinal] = parse_field(field.trim(), target).map_err(|message| ImportError {
                line: line_no,
                message: format!("column {}: {message}", column.name),
            })?;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn parse_field(field: &str, target: DataType) -> Result<Datum, String> {
    if field.is_empty() {
        return Ok(Datum::Null);
    }
    match target {
        DataType::Int32 => field
            .parse::<i32>()
            .map(Datum::Int32)
            .map_err(|_| format!("'{field}' is not a 32-bit integer")),
        DataType::Int64 => field
            .parse::<i64>()
            .map(Datum::Int64)
            .map_err(|_| format!("'{field}' is not a 64-bit integer")),
        DataType::Double => field
            .parse::<f64>()
            .map(Datum::Double)
            .map_err(|_| format!("'{field}' is not a number")),
        DataType::Bool => match field.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Datum::Bool(true)),
            "false" | "f" | "0" => Ok(Datum::Bool(false)),
            _ => Err(format!("'{field}' is not a boolean")),
        },
        DataType::String => Ok(Datum::String(field.to_string())),
        DataType::Null | DataType::UserType => Err("column type cannot be imported".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use andb_catalog::{ColumnDef, SqlType, row};

    fn sample_table() -> TableDef {
        TableDef::new(
            "t",
            vec![
                ColumnDef::new("id", SqlType::Integer, 0),
                ColumnDef::new("amount", SqlType::Double, 1),
                ColumnDef::new("name", SqlType::Char, 2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_delimiter_selection() {
        assert_eq!(delimiter_for("data.tbl", ImportFormat::Auto), '|');
        assert_eq!(delimiter_for("data.TBL", ImportFormat::Auto), '|');
        assert_eq!(delimiter_for("data.csv", ImportFormat::Auto), ',');
        assert_eq!(delimiter_for("data.csv", ImportFormat::Tbl), '|');
    }

    #[test]
    fn test_parse_csv_rows() {
        let rows = parse_rows(&sample_table(), "1,1.5,ab\n2,2.5,cd\n", ',').unwrap();
        assert_eq!(rows, vec![row![1, 1.5, "ab"], row![2, 2.5, "cd"]]);
    }

    #[test]
    fn test_parse_tbl_rows_with_trailing_delimiter() {
        let rows = parse_rows(&sample_table(), "1|1.5|ab|\n", '|').unwrap();
        assert_eq!(rows, vec![row![1, 1.5, "ab"]]);
    }

    #[test]
    fn test_empty_field_is_null() {
        let rows = parse_rows(&sample_table(), "1,,x\n", ',').unwrap();
        assert_eq!(rows[0][1], Datum::Null);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let rows = parse_rows(&sample_table(), "\n1,1.0,a\n\n2,2.0,b\n", ',').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_field_count_mismatch() {
        let err = parse_rows(&sample_table(), "1,2\n", ',').unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("expected 3 fields"));
    }

    #[test]
    fn test_bad_integer_reports_column() {
        let err = parse_rows(&sample_table(), "xyz,1.0,a\n", ',').unwrap_err();
        assert!(err.message.contains("column id"));
    }
}
