//! Lookup table rendering
//!
//! CSV layout, reproduced exactly for compatibility with existing tables:
//!
//! ```text
//! Description,Size##OTHER##GENERAL,Color##OTHER##GENERAL
//! Row_1,Small,Red
//! Row_2,Small,Blue
//! Row_3,Large,Blue
//! ```
//!
//! Lines are joined with `\n` with no trailing newline. Cells are written as
//! they are, without quoting.

use crate::combination::Combination;
use crate::error::{Error, Result};
use crate::parameter::Parameter;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file name for CSV exports
pub const DEFAULT_TABLE_FILE: &str = "revit-lookup-table.csv";

/// Header of the row label column
pub const DESCRIPTION_HEADER: &str = "Description";

/// Surviving combinations, labelled and headed for export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LookupTable {
    /// Parameter column headers (`name##TYPE##UNIT`), without `Description`
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableRow {
    /// `Row_<n>`, 1-based
    pub label: String,
    pub values: Vec<String>,
}

impl LookupTable {
    /// Label `combinations` in order. They must have been generated from
    /// `parameters`, in the same order.
    pub fn new(parameters: &[Parameter], combinations: Vec<Combination>) -> Self {
        let columns = parameters.iter().map(Parameter::column_header).collect();
        let rows = combinations
            .into_iter()
            .enumerate()
            .map(|(i, values)| TableRow {
                label: format!("Row_{}", i + 1),
                values,
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header line cells, `Description` first
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(DESCRIPTION_HEADER)
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header().join(","));
        for row in &self.rows {
            let mut cells = Vec::with_capacity(row.values.len() + 1);
            cells.push(row.label.as_str());
            cells.extend(row.values.iter().map(String::as_str));
            lines.push(cells.join(","));
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Column-aligned preview for terminals
    pub fn to_text(&self) -> String {
        let header = self.header();
        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            let cells = std::iter::once(&row.label).chain(&row.values);
            for (i, cell) in cells.enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let render = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&render(header));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        for row in &self.rows {
            out.push('\n');
            let cells = std::iter::once(row.label.as_str())
                .chain(row.values.iter().map(String::as_str))
                .collect();
            out.push_str(&render(cells));
        }
        out
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv()).map_err(Error::Io)?;
        tracing::debug!(path = %path.display(), rows = self.rows.len(), "wrote lookup table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{ParameterType, Unit};

    fn params() -> Vec<Parameter> {
        vec![
            Parameter::new("w", "Width", ParameterType::Length, Unit::Inches).unwrap(),
            Parameter::new("a", "Angle", ParameterType::Angle, Unit::Degrees).unwrap(),
        ]
    }

    fn combos(rows: &[[&str; 2]]) -> Vec<Combination> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_csv_layout() {
        let table = LookupTable::new(&params(), combos(&[["10", "45"], ["12", "90"]]));
        assert_eq!(
            table.to_csv(),
            "Description,Width##LENGTH##INCHES,Angle##ANGLE##DEGREES\nRow_1,10,45\nRow_2,12,90"
        );
    }

    #[test]
    fn test_csv_without_rows_is_header_only() {
        let table = LookupTable::new(&params(), vec![]);
        assert_eq!(
            table.to_csv(),
            "Description,Width##LENGTH##INCHES,Angle##ANGLE##DEGREES"
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_csv_cells_are_not_quoted() {
        let table = LookupTable::new(&params(), combos(&[["1,5", "\"x\""]]));
        assert!(table.to_csv().ends_with("\nRow_1,1,5,\"x\""));
    }

    #[test]
    fn test_json_shape() {
        let table = LookupTable::new(&params(), combos(&[["10", "45"]]));
        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(json["columns"][0], "Width##LENGTH##INCHES");
        assert_eq!(json["rows"][0]["label"], "Row_1");
        assert_eq!(json["rows"][0]["values"], serde_json::json!(["10", "45"]));
    }

    #[test]
    fn test_text_preview_aligns_columns() {
        let table = LookupTable::new(&params(), combos(&[["10", "45"]]));
        let text = table.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Description  Width##LENGTH##INCHES"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("Row_1        10"));
    }
}
