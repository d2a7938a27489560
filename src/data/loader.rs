use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    CellValue, Dataset, Record, BUSINESS_TYPE, CONSTRUCTION, INVESTMENT, LOCATION, RATING,
    REGION, REQUIRED_COLUMNS, STATE,
};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the investment sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one record per line
/// * `.json`    – `[{ "Region": ..., "Investment": ..., ... }, ...]`
/// * `.parquet` – flat columns written by Pandas or Polars
///
/// Every format must provide the columns in [`REQUIRED_COLUMNS`]; anything
/// else is kept as extra cells for the raw table.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Column layout shared by every format
// ---------------------------------------------------------------------------

/// Positions of the required columns within a source's column list.
struct Layout {
    columns: Vec<String>,
    region: usize,
    location: usize,
    construction: usize,
    business_type: usize,
    state: usize,
    investment: usize,
    rating: usize,
}

impl Layout {
    /// Locate the required columns, reporting every missing one at once.
    fn resolve(columns: Vec<String>) -> Result<Self, LoadError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|req| !columns.iter().any(|c| c == *req))
            .map(|req| req.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let idx = |name: &str| columns.iter().position(|c| c == name).unwrap_or(0);
        Ok(Layout {
            region: idx(REGION),
            location: idx(LOCATION),
            construction: idx(CONSTRUCTION),
            business_type: idx(BUSINESS_TYPE),
            state: idx(STATE),
            investment: idx(INVESTMENT),
            rating: idx(RATING),
            columns,
        })
    }

    fn is_category(&self, col: usize) -> bool {
        [
            self.region,
            self.location,
            self.construction,
            self.business_type,
            self.state,
        ]
        .contains(&col)
    }

    fn is_required(&self, col: usize) -> bool {
        self.is_category(col) || col == self.investment || col == self.rating
    }

    /// Turn one row of cells (in column order) into a [`Record`].
    fn record(&self, row: usize, mut cells: Vec<CellValue>) -> Result<Record, LoadError> {
        cells.resize(self.columns.len(), CellValue::Null);

        let number = |col: usize| -> Result<f64, LoadError> {
            cells[col]
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoadError::InvalidNumber {
                    row,
                    column: self.columns[col].clone(),
                    value: cells[col].to_string(),
                })
        };
        let investment = number(self.investment)?;
        let rating = number(self.rating)?;

        let text = |col: usize| cells[col].clone().into_text();
        let mut extra = BTreeMap::new();
        for (col, cell) in cells.iter().enumerate() {
            if !self.is_required(col) {
                extra.insert(self.columns[col].clone(), cell.clone());
            }
        }

        Ok(Record {
            region: text(self.region),
            location: text(self.location),
            construction: text(self.construction),
            business_type: text(self.business_type),
            state: text(self.state),
            investment,
            rating,
            extra,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Category columns are kept verbatim; extra columns get a type guess.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let layout = Layout::resolve(headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cells = row
            .iter()
            .enumerate()
            .map(|(col, raw)| {
                if layout.is_category(col) {
                    CellValue::Text(raw.trim().to_string())
                } else {
                    CellValue::guess(raw.trim())
                }
            })
            .collect();
        records.push(layout.record(row_no, cells)?);
    }

    Ok(Dataset::from_records(records, layout.columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Region": "North", "Location": "Urban", "Investment": 1500000, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut objects = Vec::with_capacity(rows.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }
    let layout = Layout::resolve(columns)?;

    let mut records = Vec::with_capacity(objects.len());
    for (i, obj) in objects.into_iter().enumerate() {
        let cells = layout
            .columns
            .iter()
            .map(|col| obj.get(col).map(json_cell).unwrap_or(CellValue::Null))
            .collect();
        records.push(layout.record(i, cells)?);
    }

    Ok(Dataset::from_records(records, layout.columns))
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Text columns may be Utf8 or LargeUtf8, numeric columns any of
/// Int32/Int64/Float32/Float64. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let layout = Layout::resolve(columns)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            let row_no = records.len();
            records.push(layout.record(row_no, cells)?);
        }
    }

    Ok(Dataset::from_records(records, layout.columns))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }

    fn downcast<'a, T: 'static>(col: &'a ArrayRef) -> Result<&'a T, LoadError> {
        col.as_any().downcast_ref::<T>().ok_or_else(|| {
            LoadError::Malformed(format!("unexpected array for {:?}", col.data_type()))
        })
    }

    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::Text(downcast::<StringArray>(col)?.value(row).to_string()),
        DataType::LargeUtf8 => {
            CellValue::Text(downcast::<LargeStringArray>(col)?.value(row).to_string())
        }
        DataType::Int32 => CellValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => CellValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => CellValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => CellValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => CellValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => CellValue::Text(format!("{other:?}")),
    };
    Ok(cell)
}
