// In-memory workbook model and loaders for .xlsx files and CSV directories.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Empty cells and NaN floats carry no value.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Interpret a CSV field: integers, then decimals, then text.
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else if let Ok(v) = trimmed.parse::<i64>() {
            Cell::Int(v)
        } else if let Ok(v) = trimmed.parse::<f64>() {
            Cell::Float(v)
        } else {
            Cell::Text(raw.to_string())
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::Int(v) => Cell::Int(*v),
            Data::Float(v) => Cell::Float(*v),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Bool(*b),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One named sheet: a header row plus data rows. Rows may be shorter than
/// the header; absent trailing cells read as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read workbook {path}: {source}")]
    Excel {
        path: PathBuf,
        source: calamine::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("unsupported workbook source {0}")]
    Unsupported(PathBuf),
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

impl Workbook {
    /// Open `path` as a directory of CSV sheets, a single CSV sheet, or an
    /// Excel/ODS workbook, depending on what it is.
    pub fn open(path: &Path) -> Result<Self, WorkbookError> {
        if path.is_dir() {
            return Self::from_csv_dir(path);
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Workbook {
                sheets: vec![sheet_from_csv_file(path)?],
            }),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::from_xlsx(path),
            _ => Err(WorkbookError::Unsupported(path.to_path_buf())),
        }
    }

    /// Read every sheet of a spreadsheet file. The first row of each sheet
    /// is its header row.
    pub fn from_xlsx(path: &Path) -> Result<Self, WorkbookError> {
        let excel_err = |source| WorkbookError::Excel {
            path: path.to_path_buf(),
            source,
        };
        let mut excel = open_workbook_auto(path).map_err(excel_err)?;

        let mut sheets = Vec::new();
        for name in excel.sheet_names() {
            let range = excel.worksheet_range(&name).map_err(excel_err)?;
            let mut rows = range.rows();
            let headers: Vec<String> = rows
                .next()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .unwrap_or_default();
            let rows: Vec<Vec<Cell>> = rows.map(|r| r.iter().map(Cell::from).collect()).collect();
            debug!("read sheet '{}' with {} rows", name, rows.len());
            sheets.push(Sheet {
                name,
                headers,
                rows,
            });
        }

        info!("read {} sheets from {}", sheets.len(), path.display());
        Ok(Workbook { sheets })
    }

    /// Treat every `*.csv` file in `dir` as a sheet named after its file stem
    /// (e.g. `2025.csv` becomes sheet `2025`). Sheets are ordered by file name.
    pub fn from_csv_dir(dir: &Path) -> Result<Self, WorkbookError> {
        let io_err = |source| WorkbookError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                paths.push(path);
            }
        }
        paths.sort();

        let sheets = paths
            .iter()
            .map(|p| sheet_from_csv_file(p))
            .collect::<Result<Vec<_>, _>>()?;
        info!("read {} CSV sheets from {}", sheets.len(), dir.display());
        Ok(Workbook { sheets })
    }
}

fn sheet_from_csv_file(path: &Path) -> Result<Sheet, WorkbookError> {
    let file = std::fs::File::open(path).map_err(|e| WorkbookError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sheet_from_reader(name, file).map_err(|e| WorkbookError::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reader-based CSV loader (enables testing without temp files).
pub fn sheet_from_reader<R: Read>(name: impl Into<String>, rdr: R) -> Result<Sheet, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }
    Ok(Sheet {
        name: name.into(),
        headers,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
