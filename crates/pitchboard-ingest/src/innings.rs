// Innings-pitched parsing: "180 2/3", "123 ⅓", "100.2".

use crate::workbook::Cell;

const ONE_THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Parse an innings-pitched cell into decimal innings rounded to two places
/// (one third → .33, two thirds → .67).
///
/// Finite numeric cells pass through unchanged. Text is a whole number optionally
/// followed by a space and a fraction token; unknown fraction tokens add
/// nothing. Returns `None` for blank, unparsable or non-finite input.
pub fn parse_innings(cell: &Cell) -> Option<f64> {
    match cell {
        _ if cell.is_missing() => None,
        Cell::Int(v) => Some(*v as f64),
        Cell::Float(v) => v.is_finite().then_some(*v),
        Cell::Text(s) => parse_innings_str(s),
        Cell::Empty | Cell::Bool(_) => None,
    }
}

pub fn parse_innings_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Only a space separates the fraction; "180\t2/3" is one unparsable token.
    let (whole, fraction) = if trimmed.contains(' ') {
        let mut parts = trimmed.split_whitespace();
        let whole = parts.next()?;
        let fraction = parts.next();
        if parts.next().is_some() {
            return None;
        }
        (whole, fraction)
    } else {
        (trimmed, None)
    };

    let base: f64 = whole.parse().ok().filter(|v: &f64| v.is_finite())?;
    let extra = match fraction {
        Some("1/3" | "⅓") => ONE_THIRD,
        Some("2/3" | "⅔") => TWO_THIRDS,
        _ => 0.0,
    };

    Some(round2(base + extra))
}

/// Rounds the exact stored value, not a scaled product.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
