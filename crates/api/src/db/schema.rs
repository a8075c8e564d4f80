//! Declared layout of the climate dataset, checked once at startup.

use std::fmt;

/// What a column must hold for the queries to decode it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Real,
}

impl ColumnKind {
    /// Whether a column declared as `declared` can serve this kind.
    ///
    /// Real columns are read through `CAST(.. AS REAL)`, so NUMERIC affinity
    /// holding whole numbers is fine; INTEGER, TEXT and untyped columns are not.
    pub fn accepts(self, declared: &str) -> bool {
        let affinity = Affinity::of(declared);
        match self {
            ColumnKind::Text => matches!(affinity, Affinity::Text | Affinity::Blob),
            ColumnKind::Real => matches!(affinity, Affinity::Real | Affinity::Numeric),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Text => write!(f, "TEXT"),
            ColumnKind::Real => write!(f, "REAL"),
        }
    }
}

/// SQLite type affinity, resolved from a declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    // Rules are applied in order, see https://www.sqlite.org/datatype3.html
    fn of(declared: &str) -> Self {
        let declared = declared.to_ascii_uppercase();
        if declared.contains("INT") {
            Affinity::Integer
        } else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| declared.contains(t)) {
            Affinity::Text
        } else if declared.is_empty() || declared.contains("BLOB") {
            Affinity::Blob
        } else if ["REAL", "FLOA", "DOUB"].iter().any(|t| declared.contains(t)) {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

const fn column(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec { name, kind }
}

/// `station` table backing [`super::StationRecord`]
pub const STATION_SCHEMA: TableSchema = TableSchema {
    name: "station",
    columns: &[
        column("station", ColumnKind::Text),
        column("name", ColumnKind::Text),
        column("latitude", ColumnKind::Real),
        column("longitude", ColumnKind::Real),
        column("elevation", ColumnKind::Real),
    ],
};

/// `measurement` table, one daily observation per row
pub const MEASUREMENT_SCHEMA: TableSchema = TableSchema {
    name: "measurement",
    columns: &[
        column("station", ColumnKind::Text),
        column("date", ColumnKind::Text),
        column("prcp", ColumnKind::Real),
        column("tobs", ColumnKind::Real),
    ],
};

pub const SCHEMA: &[TableSchema] = &[STATION_SCHEMA, MEASUREMENT_SCHEMA];
