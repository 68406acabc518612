use std::cmp::Ordering;

/// One row of case metadata returned by the search service.
///
/// Records are immutable once received; the whole set is replaced on every
/// search response. `path` is opaque here and only travels back to the
/// server for the folder-open action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub number: String,
    pub client: String,
    pub area: String,
    pub service: String,
    pub year: String,
    pub reference: String,
    pub path: String,
}

/// Sortable columns of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Number,
    Client,
    Area,
    Service,
    Year,
    Reference,
}

impl SortColumn {
    /// Parses a column name as typed by the user.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Number),
            "client" => Some(Self::Client),
            "area" => Some(Self::Area),
            "service" => Some(Self::Service),
            "year" => Some(Self::Year),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Client => "client",
            Self::Area => "area",
            Self::Service => "service",
            Self::Year => "year",
            Self::Reference => "reference",
        }
    }

    fn field(self, record: &ProcessRecord) -> &str {
        match self {
            Self::Number => &record.number,
            Self::Client => &record.client,
            Self::Area => &record.area,
            Self::Service => &record.service,
            Self::Year => &record.year,
            Self::Reference => &record.reference,
        }
    }
}

/// Ascending comparison by `column`. The identifier column compares
/// numerically so "9" orders before "10"; a non-numeric identifier falls
/// back to string order.
pub(crate) fn compare_records(
    a: &ProcessRecord,
    b: &ProcessRecord,
    column: SortColumn,
) -> Ordering {
    if column == SortColumn::Number {
        if let (Ok(a_num), Ok(b_num)) = (a.number.parse::<i64>(), b.number.parse::<i64>()) {
            return a_num.cmp(&b_num);
        }
    }
    column.field(a).cmp(column.field(b))
}
