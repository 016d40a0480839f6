use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::ReportError;

/// the report as a rectangular grid of text cells, addressed with 1-based
/// rows and columns. rows and columns beyond the stored extent read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportGrid {
    rows: Vec<Vec<String>>,
}

impl ReportGrid {
    /// a grid holding only the given header row
    pub fn with_header(header: Vec<String>) -> ReportGrid {
        ReportGrid { rows: vec![header] }
    }

    /// reads a grid from a CSV file. every line is a grid row, including the first.
    pub fn open(path: &Path) -> Result<ReportGrid, ReportError> {
        let read_error = |source| ReportError::ReadError {
            path: path.display().to_string(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(read_error)?;
        let rows = reader
            .records()
            .map(|r| r.map(|record| record.iter().map(String::from).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        Ok(ReportGrid { rows })
    }

    /// writes the grid to a sibling temporary file which then replaces `path`,
    /// so an interrupted save leaves the previous report intact. rows are
    /// padded to a common width.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        let tmp_path = temporary_path(path);
        let write_error = |source| ReportError::WriteError {
            path: tmp_path.display().to_string(),
            source,
        };
        let width = self.width();
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .map_err(write_error)?;
        for row in self.rows.iter() {
            let mut record = StringRecord::from(row.clone());
            for _ in row.len()..width {
                record.push_field("");
            }
            writer.write_record(&record).map_err(write_error)?;
        }
        writer.flush().map_err(|e| write_error(csv::Error::from(e)))?;
        drop(writer);
        std::fs::rename(&tmp_path, path).map_err(|source| ReportError::PersistError {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or_default()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 || column == 0 {
            return None;
        }
        self.rows
            .get(row - 1)
            .and_then(|r| r.get(column - 1))
            .map(|c| c.as_str())
    }

    /// overwrites a cell, growing the grid as needed. row and column 0 do not exist.
    pub fn set(&mut self, row: usize, column: usize, value: &str) {
        if row == 0 || column == 0 {
            log::warn!("ignoring write to report cell ({row}, {column}), cells are 1-based");
            return;
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < column {
            cells.resize_with(column, String::new);
        }
        cells[column - 1] = value.to_string();
    }

    /// first column within `columns` of `row` whose trimmed text equals `value`
    pub fn find_in_row(
        &self,
        row: usize,
        columns: RangeInclusive<usize>,
        value: &str,
    ) -> Option<usize> {
        columns
            .into_iter()
            .find(|col| self.get(row, *col).map(str::trim) == Some(value.trim()))
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
