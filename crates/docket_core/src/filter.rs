use std::fmt;

/// User-entered search filters. An empty string means "unset"; the server
/// treats missing and empty parameters the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub client: String,
    pub number_start: String,
    pub number_end: String,
    pub year: String,
    pub area: String,
    pub service: String,
    pub reference: String,
}

/// The editable filter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Client,
    NumberStart,
    NumberEnd,
    Year,
    Area,
    Service,
    Reference,
}

impl FilterField {
    /// Parses a field name as typed by the user.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "client" => Some(Self::Client),
            "start" | "number_start" => Some(Self::NumberStart),
            "end" | "number_end" => Some(Self::NumberEnd),
            "year" => Some(Self::Year),
            "area" => Some(Self::Area),
            "service" => Some(Self::Service),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }
}

/// Validation failure raised before a query is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Both range bounds are numeric and the start exceeds the end.
    InvertedRange { start: i64, end: i64 },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvertedRange { start, end } => write!(
                f,
                "the start number ({start}) must be less than or equal to the end number ({end})"
            ),
        }
    }
}

impl FilterSet {
    pub(crate) fn set(&mut self, field: FilterField, value: String) {
        let slot = match field {
            FilterField::Client => &mut self.client,
            FilterField::NumberStart => &mut self.number_start,
            FilterField::NumberEnd => &mut self.number_end,
            FilterField::Year => &mut self.year,
            FilterField::Area => &mut self.area,
            FilterField::Service => &mut self.service,
            FilterField::Reference => &mut self.reference,
        };
        *slot = value.trim().to_owned();
    }

    /// Checks the numeric range invariant. Bounds that do not parse as
    /// integers are ignored, matching the server's own filtering.
    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Ok(start), Ok(end)) = (
            self.number_start.parse::<i64>(),
            self.number_end.parse::<i64>(),
        ) {
            if start > end {
                return Err(FilterError::InvertedRange { start, end });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_empty()
            && self.number_start.is_empty()
            && self.number_end.is_empty()
            && self.year.is_empty()
            && self.area.is_empty()
            && self.service.is_empty()
            && self.reference.is_empty()
    }
}
