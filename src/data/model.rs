use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the fixed schema
// ---------------------------------------------------------------------------

pub const REGION: &str = "Region";
pub const LOCATION: &str = "Location";
pub const CONSTRUCTION: &str = "Construction";
pub const BUSINESS_TYPE: &str = "BusinessType";
pub const STATE: &str = "State";
pub const INVESTMENT: &str = "Investment";
pub const RATING: &str = "Rating";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    REGION,
    LOCATION,
    CONSTRUCTION,
    BUSINESS_TYPE,
    STATE,
    INVESTMENT,
    RATING,
];

// ---------------------------------------------------------------------------
// CellValue – a single cell outside the fixed schema
// ---------------------------------------------------------------------------

/// A dynamically-typed cell for the columns the report does not interpret.
/// They are kept only so the raw table can show them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell (CSV has no types of its own).
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// Interpret the cell as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Interpret the cell as category text. Numbers are rendered as-is.
    pub fn into_text(self) -> String {
        match self {
            CellValue::Text(s) => s,
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dimension – the three filterable category columns
// ---------------------------------------------------------------------------

/// One of the three categorical dimensions the user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Region,
    Location,
    Construction,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Region,
        Dimension::Location,
        Dimension::Construction,
    ];

    /// Source column backing this dimension.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Region => REGION,
            Dimension::Location => LOCATION,
            Dimension::Construction => CONSTRUCTION,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the sheet
// ---------------------------------------------------------------------------

/// A single investment record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region: String,
    pub location: String,
    pub construction: String,
    pub business_type: String,
    pub state: String,
    pub investment: f64,
    pub rating: f64,
    /// Columns outside the fixed schema: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    /// Value of the record in one of the filter dimensions.
    pub fn category(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::Location => &self.location,
            Dimension::Construction => &self.construction,
        }
    }

    /// Any column by name, for the raw table view.
    pub fn cell(&self, column: &str) -> CellValue {
        match column {
            REGION => CellValue::Text(self.region.clone()),
            LOCATION => CellValue::Text(self.location.clone()),
            CONSTRUCTION => CellValue::Text(self.construction.clone()),
            BUSINESS_TYPE => CellValue::Text(self.business_type.clone()),
            STATE => CellValue::Text(self.state.clone()),
            INVESTMENT => CellValue::Float(self.investment),
            RATING => CellValue::Float(self.rating),
            other => self.extra.get(other).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The full loaded table. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Column names in file order (required and extra).
    pub column_names: Vec<String>,
    /// For each filter dimension the distinct values in first-seen order.
    options: BTreeMap<Dimension, Vec<String>>,
}

impl Dataset {
    /// Build the dimension indices from the loaded records.
    pub fn from_records(records: Vec<Record>, column_names: Vec<String>) -> Self {
        let mut options: BTreeMap<Dimension, Vec<String>> = BTreeMap::new();
        for dim in Dimension::ALL {
            let values = options.entry(dim).or_default();
            for rec in &records {
                let v = rec.category(dim);
                if !values.iter().any(|seen| seen == v) {
                    values.push(v.to_string());
                }
            }
        }
        Dataset {
            records,
            column_names,
            options,
        }
    }

    /// Distinct values of a dimension, in the order they first appear.
    pub fn distinct(&self, dimension: Dimension) -> &[String] {
        self.options
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(
        region: &str,
        location: &str,
        construction: &str,
        business_type: &str,
        state: &str,
        investment: f64,
        rating: f64,
    ) -> Record {
        Record {
            region: region.to_string(),
            location: location.to_string(),
            construction: construction.to_string(),
            business_type: business_type.to_string(),
            state: state.to_string(),
            investment,
            rating,
            extra: BTreeMap::new(),
        }
    }

    /// Six records over two regions, used across the pipeline tests.
    pub fn sample() -> Dataset {
        let records = vec![
            record("North", "Urban", "Frame", "Retail", "Arusha", 1_000_000.0, 4.0),
            record("South", "Rural", "Masonry", "Farming", "Mbeya", 2_500_000.0, 3.0),
            record("North", "Rural", "Masonry", "Retail", "Arusha", 500_000.0, 5.0),
            record("South", "Urban", "Frame", "Hotel", "Iringa", 2_500_000.0, 2.0),
            record("North", "Urban", "Concrete", "Farming", "Mwanza", 750_000.0, 4.5),
            record("South", "Urban", "Concrete", "Retail", "Iringa", 3_000_000.0, 3.5),
        ];
        Dataset::from_records(records, REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let ds = fixtures::sample();
        assert_eq!(ds.distinct(Dimension::Region), ["North", "South"]);
        assert_eq!(ds.distinct(Dimension::Location), ["Urban", "Rural"]);
        assert_eq!(
            ds.distinct(Dimension::Construction),
            ["Frame", "Masonry", "Concrete"]
        );
    }

    #[test]
    fn cell_reads_fixed_and_extra_columns() {
        let mut rec = fixtures::record("North", "Urban", "Frame", "Retail", "Arusha", 10.0, 1.0);
        rec.extra.insert("Earthquake".into(), CellValue::Bool(true));
        assert_eq!(rec.cell(STATE), CellValue::Text("Arusha".into()));
        assert_eq!(rec.cell(INVESTMENT), CellValue::Float(10.0));
        assert_eq!(rec.cell("Earthquake"), CellValue::Bool(true));
        assert_eq!(rec.cell("Missing"), CellValue::Null);
    }

    #[test]
    fn guess_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("Dodoma"), CellValue::Text("Dodoma".into()));
    }
}
