use crate::config::TableConfig;
use crate::error::{PicGetError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// One lookup table row, cells already converted to text (not trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub style_code: String,
    pub color_description: String,
    pub color_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Workbook,
    Csv,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(TableFormat::Workbook),
            "csv" => Ok(TableFormat::Csv),
            _ => Err(PicGetError::UnsupportedTable {
                path: path.display().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    style: usize,
    color: usize,
    code: usize,
}

pub struct TableLoader {
    columns: TableConfig,
}

impl TableLoader {
    pub fn new(columns: &TableConfig) -> Self {
        Self {
            columns: columns.clone(),
        }
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TableRow>> {
        let path = path.as_ref();

        match TableFormat::from_path(path)? {
            TableFormat::Workbook => self.load_workbook(path),
            TableFormat::Csv => self.load_csv(path),
        }
    }

    fn load_csv(&self, path: &Path) -> Result<Vec<TableRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| table_error(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| table_error(path, e))?
            .iter()
            .map(String::from)
            .collect();
        let indices = self.column_indices(&headers, path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| table_error(path, e))?;
            let cell = |index: usize| record.get(index).unwrap_or("").to_string();

            rows.push(TableRow {
                style_code: cell(indices.style),
                color_description: cell(indices.color),
                color_code: cell(indices.code),
            });
        }

        Ok(rows)
    }

    fn load_workbook(&self, path: &Path) -> Result<Vec<TableRow>> {
        let mut workbook = open_workbook_auto(path).map_err(|e| table_error(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PicGetError::TableRead {
                path: path.display().to_string(),
                message: "workbook has no worksheets".to_string(),
            })?
            .map_err(|e| table_error(path, e))?;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = match sheet_rows.next() {
            Some(header_row) => header_row.iter().map(cell_to_string).collect(),
            None => Vec::new(),
        };
        let indices = self.column_indices(&headers, path)?;

        let rows = sheet_rows
            .map(|row| {
                let cell = |index: usize| row.get(index).map(cell_to_string).unwrap_or_default();
                TableRow {
                    style_code: cell(indices.style),
                    color_description: cell(indices.color),
                    color_code: cell(indices.code),
                }
            })
            .collect();

        Ok(rows)
    }

    fn column_indices(&self, headers: &[String], path: &Path) -> Result<ColumnIndices> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column.trim())
                .ok_or_else(|| PicGetError::MissingColumn {
                    path: path.display().to_string(),
                    column: column.to_string(),
                })
        };

        Ok(ColumnIndices {
            style: find(&self.columns.style_column)?,
            color: find(&self.columns.color_column)?,
            code: find(&self.columns.code_column)?,
        })
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new(&TableConfig::default())
    }
}

fn table_error<E: std::fmt::Display>(path: &Path, error: E) -> PicGetError {
    PicGetError::TableRead {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

/// Workbook cell as text; whole-number floats lose their `.0`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
