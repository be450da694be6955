// Season workbook ingestion: sheets of raw pitching lines in, store write
// actions out.

pub mod columns;
pub mod innings;
pub mod normalize;
pub mod workbook;

pub use innings::parse_innings;
pub use normalize::{normalize_workbook, NormalizeReport};
pub use workbook::{Cell, Sheet, Workbook, WorkbookError};
