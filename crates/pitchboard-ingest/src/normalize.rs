// Workbook → pitcher season documents.

use pitchboard_core::{Metric, PitcherSeasonStat, StatValue, WriteAction};
use tracing::{debug, info, warn};

use crate::columns::{map_header, SourceField};
use crate::innings::parse_innings;
use crate::workbook::{Cell, Sheet, Workbook};

/// Output of a normalization pass: the write batch plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    pub actions: Vec<WriteAction>,
    /// Sheets whose name is not a season year.
    pub skipped_sheets: Vec<String>,
    /// Rows dropped for lacking a player name or team.
    pub skipped_rows: usize,
}

/// Normalize every season sheet of `workbook` into write actions targeting
/// `collection`. Never fails: bad sheets and rows are skipped and counted.
pub fn normalize_workbook(workbook: &Workbook, collection: &str) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for sheet in &workbook.sheets {
        let Ok(season) = sheet.name.trim().parse::<i32>() else {
            warn!("sheet '{}' is not a season year, skipping", sheet.name);
            report.skipped_sheets.push(sheet.name.clone());
            continue;
        };

        info!(
            "loading sheet '{}' (season={}), {} rows",
            sheet.name,
            season,
            sheet.rows.len()
        );
        let (docs, skipped) = normalize_sheet(sheet, season);
        report.skipped_rows += skipped;
        report
            .actions
            .extend(docs.into_iter().map(|document| WriteAction {
                collection: collection.to_string(),
                document,
            }));
    }

    info!(
        "normalized {} documents ({} sheets skipped, {} rows skipped)",
        report.actions.len(),
        report.skipped_sheets.len(),
        report.skipped_rows
    );
    report
}

/// Normalize one sheet's rows. Returns the documents and the number of rows
/// that were dropped.
pub fn normalize_sheet(sheet: &Sheet, season: i32) -> (Vec<PitcherSeasonStat>, usize) {
    let fields = column_fields(&sheet.headers);
    let mut docs = Vec::with_capacity(sheet.rows.len());
    let mut skipped = 0;

    for (index, row) in sheet.rows.iter().enumerate() {
        match normalize_row(&fields, row, season) {
            Some(doc) => docs.push(doc),
            None => {
                debug!(
                    "sheet '{}' row {}: missing player name or team, skipping",
                    sheet.name,
                    index + 2
                );
                skipped += 1;
            }
        }
    }

    (docs, skipped)
}

/// Resolve each header to its field. A field mapped by more than one column
/// keeps the first one.
fn column_fields(headers: &[String]) -> Vec<Option<SourceField>> {
    let mut seen = Vec::new();
    headers
        .iter()
        .map(|header| {
            let field = map_header(header)?;
            if seen.contains(&field) {
                warn!("duplicate column '{}' ignored", header.trim());
                return None;
            }
            seen.push(field);
            Some(field)
        })
        .collect()
}

/// Build a document from one row, or `None` when player name or team is
/// missing.
fn normalize_row(
    fields: &[Option<SourceField>],
    row: &[Cell],
    season: i32,
) -> Option<PitcherSeasonStat> {
    let mut player_name = None;
    let mut team = None;
    let mut doc = PitcherSeasonStat::new(season, String::new(), String::new());

    for (field, cell) in fields.iter().zip(row) {
        let Some(field) = field else { continue };
        if cell.is_missing() {
            continue;
        }
        match field {
            SourceField::PlayerName => player_name = text_value(cell),
            SourceField::Team => team = text_value(cell),
            SourceField::Stat(Metric::Ip) => {
                if let Some(ip) = parse_innings(cell) {
                    doc.stats.insert(Metric::Ip, StatValue::Float(ip));
                }
            }
            SourceField::Stat(metric) => {
                if let Some(value) = numeric_value(*metric, cell) {
                    doc.stats.insert(*metric, value);
                }
            }
        }
    }

    doc.player_name = player_name?;
    doc.team = team?;
    Some(doc)
}

/// Names and teams: text is trimmed, numbers are rendered as text.
fn text_value(cell: &Cell) -> Option<String> {
    let text = cell.to_string();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Stat cells become numbers; numeric-looking text is coerced and anything
/// else is treated as missing. Rate metrics are always floats. Counting
/// metrics are integers whenever the value is whole, since spreadsheet cells
/// store every number as a float.
fn numeric_value(metric: Metric, cell: &Cell) -> Option<StatValue> {
    let number = match cell {
        Cell::Int(v) => StatValue::Int(*v),
        Cell::Float(v) => StatValue::Float(*v),
        Cell::Text(s) => match Cell::from_field(s) {
            Cell::Int(v) => StatValue::Int(v),
            Cell::Float(v) => StatValue::Float(v),
            _ => return None,
        },
        Cell::Empty | Cell::Bool(_) => return None,
    };

    match number {
        StatValue::Float(v) if !v.is_finite() => None,
        StatValue::Int(v) if metric.is_rate_based() => Some(StatValue::Float(v as f64)),
        StatValue::Float(v) if !metric.is_rate_based() && is_whole(v) => {
            Some(StatValue::Int(v as i64))
        }
        other => Some(other),
    }
}

/// Whole and within the range where `f64` holds integers exactly.
fn is_whole(v: f64) -> bool {
    v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
