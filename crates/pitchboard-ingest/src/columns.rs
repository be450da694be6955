// Source sheet header vocabulary.

use pitchboard_core::Metric;

/// What a recognised source column feeds on the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    PlayerName,
    Team,
    Stat(Metric),
}

/// Source header → document field. Headers not listed here are ignored.
pub const COLUMN_MAP: [(&str, SourceField); 32] = [
    ("선수명", SourceField::PlayerName),
    ("팀명", SourceField::Team),
    ("ERA", SourceField::Stat(Metric::Era)),
    ("G", SourceField::Stat(Metric::G)),
    ("W", SourceField::Stat(Metric::W)),
    ("L", SourceField::Stat(Metric::L)),
    ("SV", SourceField::Stat(Metric::Sv)),
    ("HLD", SourceField::Stat(Metric::Hld)),
    ("WPCT", SourceField::Stat(Metric::Wpct)),
    ("IP", SourceField::Stat(Metric::Ip)),
    ("H", SourceField::Stat(Metric::H)),
    ("HR", SourceField::Stat(Metric::Hr)),
    ("BB", SourceField::Stat(Metric::Bb)),
    ("HBP", SourceField::Stat(Metric::Hbp)),
    ("SO", SourceField::Stat(Metric::So)),
    ("R", SourceField::Stat(Metric::R)),
    ("ER", SourceField::Stat(Metric::Er)),
    ("WHIP", SourceField::Stat(Metric::Whip)),
    ("CG", SourceField::Stat(Metric::Cg)),
    ("SHO", SourceField::Stat(Metric::Sho)),
    ("QS", SourceField::Stat(Metric::Qs)),
    ("BSV", SourceField::Stat(Metric::Bsv)),
    ("TBF", SourceField::Stat(Metric::Tbf)),
    ("NP", SourceField::Stat(Metric::Np)),
    ("AVG", SourceField::Stat(Metric::Avg)),
    ("2B", SourceField::Stat(Metric::Doubles)),
    ("3B", SourceField::Stat(Metric::Triples)),
    ("SAC", SourceField::Stat(Metric::Sac)),
    ("SF", SourceField::Stat(Metric::Sf)),
    ("IBB", SourceField::Stat(Metric::Ibb)),
    ("WP", SourceField::Stat(Metric::Wp)),
    ("BK", SourceField::Stat(Metric::Bk)),
];

/// Map a raw header to its field. Surrounding whitespace is ignored; the
/// match itself is exact.
pub fn map_header(header: &str) -> Option<SourceField> {
    let header = header.trim();
    COLUMN_MAP
        .iter()
        .find(|(name, _)| *name == header)
        .map(|(_, field)| *field)
}
