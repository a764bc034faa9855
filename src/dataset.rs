//! Dataset types for csv-health.
//!
//! Provides [`CsvDataset`], the immutable in-memory snapshot every diagnostic
//! check reads from, and [`Column`], its per-column view.
//!
//! Parsing and type inference are delegated to Arrow's CSV reader. The Arrow
//! `DataType` of each column is reduced to a [`ColumnKind`] tag at load time
//! so the checks never have to look at Arrow types themselves. Dates and
//! times stay text, exactly as written in the file.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use arrow::{
    array::{Array, ArrayRef, LargeStringArray, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema, SchemaRef},
    error::ArrowError,
    util::display::{ArrayFormatter, FormatOptions},
};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Batch size used when reading CSV content.
const BATCH_SIZE: usize = 8192;

/// Type tag assigned to each column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer, floating point or decimal values.
    Numeric,
    /// Free text.
    Textual,
    /// Booleans and all-null columns.
    Other,
}

impl ColumnKind {
    /// Classify an inferred Arrow data type.
    #[must_use]
    pub fn from_data_type(data_type: &DataType) -> Self {
        if data_type.is_numeric() {
            return Self::Numeric;
        }
        match data_type {
            DataType::Utf8 | DataType::LargeUtf8 => Self::Textual,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Textual => write!(f, "textual"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single column of a [`CsvDataset`].
///
/// Values are kept as their textual rendering; `None` marks a missing cell
/// (a null from the reader or an empty string).
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data_type: DataType,
    kind: ColumnKind,
    values: Vec<Option<String>>,
}

impl Column {
    /// Column name as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arrow data type inferred for the column.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Type tag derived from the inferred data type.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// All cell values in row order.
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Number of cells (equal to the dataset row count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterator over the non-missing values.
    pub fn present_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().filter_map(|v| v.as_deref())
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Number of non-missing cells.
    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Returns true when every cell is missing.
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// An immutable tabular snapshot of one CSV file.
///
/// Row and column counts are fixed at construction. A `CsvDataset` always has
/// at least one column and one data row; anything smaller is rejected with
/// [`Error::EmptyFile`].
///
/// # Example
///
/// ```
/// use csv_health::CsvDataset;
///
/// let dataset = CsvDataset::from_csv_str("id,name\n1,ann\n2,bob\n").unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.column_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CsvDataset {
    source: Option<PathBuf>,
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    columns: Vec<Column>,
    row_count: usize,
}

impl CsvDataset {
    /// Parses CSV content held in memory. The first record is the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the content is not valid CSV and
    /// [`Error::EmptyFile`] if it has no columns or no data rows.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::parse(data.as_bytes(), None)
    }

    /// Parses raw CSV bytes. `source` is only used for error context.
    ///
    /// Dates and times are kept as text. A column whose inferred type does
    /// not fit every value is read as text as well, so only malformed CSV
    /// fails to load.
    pub(crate) fn parse(data: &[u8], source: Option<&Path>) -> Result<Self> {
        use arrow_csv::reader::Format;

        let format = Format::default().with_header(true);
        let (inferred, records) = format
            .infer_schema(Cursor::new(data), None)
            .map_err(|e| Error::from_arrow(&e, source))?;

        if inferred.fields().is_empty() {
            return Err(Error::empty_file(source, "no columns"));
        }
        debug!(
            columns = inferred.fields().len(),
            records, "inferred CSV schema"
        );

        let mut schema = temporal_as_text(&inferred);
        let batches = match read_batches(data, &schema, None) {
            Ok(batches) => batches,
            Err(err) => {
                let relaxed = unparsable_as_text(data, &schema);
                if relaxed == schema {
                    return Err(Error::from_arrow(&err, source));
                }
                schema = relaxed;
                read_batches(data, &schema, None).map_err(|e| Error::from_arrow(&e, source))?
            }
        };

        Self::from_batches(schema, batches, source)
    }

    fn from_batches(
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
        source: Option<&Path>,
    ) -> Result<Self> {
        let row_count: usize = batches.iter().map(RecordBatch::num_rows).sum();
        if row_count == 0 {
            return Err(Error::empty_file(source, "no data rows"));
        }

        let columns = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let mut values = Vec::with_capacity(row_count);
                for batch in &batches {
                    collect_values(batch.column(idx), &mut values)
                        .map_err(|e| Error::from_arrow(&e, source))?;
                }
                Ok::<_, Error>(Column {
                    name: field.name().clone(),
                    data_type: field.data_type().clone(),
                    kind: ColumnKind::from_data_type(field.data_type()),
                    values,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: source.map(Path::to_path_buf),
            schema,
            batches,
            columns,
            row_count,
        })
    }

    /// Path the dataset was loaded from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Returns true if the dataset contains no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Arrow schema as inferred by the reader.
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Number of Arrow record batches backing the dataset.
    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    /// All columns in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column at a position.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Header names in order, duplicates included.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Cells of one row in column order.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn row(&self, index: usize) -> Option<Vec<Option<&str>>> {
        if index >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[index].as_deref())
                .collect(),
        )
    }

    /// Iterator over all rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<&str>>> + '_ {
        (0..self.row_count).map(move |i| {
            self.columns
                .iter()
                .map(|c| c.values[i].as_deref())
                .collect()
        })
    }
}

/// Read `data` against `schema`, optionally decoding only some columns.
fn read_batches(
    data: &[u8],
    schema: &SchemaRef,
    projection: Option<Vec<usize>>,
) -> std::result::Result<Vec<RecordBatch>, ArrowError> {
    use arrow_csv::ReaderBuilder;

    let mut builder = ReaderBuilder::new(Arc::clone(schema))
        .with_header(true)
        .with_batch_size(BATCH_SIZE);
    if let Some(projection) = projection {
        builder = builder.with_projection(projection);
    }
    builder.build(Cursor::new(data))?.collect()
}

fn temporal_as_text(schema: &Schema) -> SchemaRef {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| {
            let field = field.as_ref().clone();
            if field.data_type().is_temporal() {
                field.with_data_type(DataType::Utf8)
            } else {
                field
            }
        })
        .collect();
    Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()))
}

/// Retype as text every typed column that fails to decode on its own.
fn unparsable_as_text(data: &[u8], schema: &SchemaRef) -> SchemaRef {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let field = field.as_ref().clone();
            if ColumnKind::from_data_type(field.data_type()) == ColumnKind::Textual
                || read_batches(data, schema, Some(vec![idx])).is_ok()
            {
                return field;
            }
            debug!(
                column = field.name().as_str(),
                data_type = %field.data_type(),
                "values do not fit inferred type, reading column as text"
            );
            field.with_data_type(DataType::Utf8)
        })
        .collect();
    Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()))
}

/// Append the textual rendering of every cell in `array` to `out`.
fn collect_values(
    array: &ArrayRef,
    out: &mut Vec<Option<String>>,
) -> std::result::Result<(), ArrowError> {
    if let Some(arr) = array.as_any().downcast_ref::<StringArray>() {
        out.extend(arr.iter().map(normalize_text));
        return Ok(());
    }
    if let Some(arr) = array.as_any().downcast_ref::<LargeStringArray>() {
        out.extend(arr.iter().map(normalize_text));
        return Ok(());
    }

    // An all-empty column is inferred as the null type, which has no validity
    // buffer of its own.
    if array.data_type() == &DataType::Null {
        out.extend(std::iter::repeat(None).take(array.len()));
        return Ok(());
    }

    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    for i in 0..array.len() {
        if array.is_null(i) {
            out.push(None);
        } else {
            out.push(normalize_text(Some(formatter.value(i).to_string().as_str())));
        }
    }
    Ok(())
}

// Empty strings count as missing; whitespace-only strings are kept.
fn normalize_text(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_str_counts() {
        let dataset = CsvDataset::from_csv_str("a,b,c\n1,x,true\n2,y,false\n3,z,true\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.column_names(), vec!["a", "b", "c"]);
        assert!(dataset.source().is_none());
        assert!(!dataset.is_empty());
        assert_eq!(dataset.num_batches(), 1);
    }

    #[test]
    fn test_column_kinds() {
        let dataset = CsvDataset::from_csv_str("i,f,s,b\n1,1.5,x,true\n2,2.5,y,false\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let kinds: Vec<ColumnKind> = dataset.columns().iter().map(Column::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Numeric,
                ColumnKind::Numeric,
                ColumnKind::Textual,
                ColumnKind::Other
            ]
        );
        assert_eq!(dataset.columns()[0].data_type(), &DataType::Int64);
        assert_eq!(dataset.columns()[1].data_type(), &DataType::Float64);
    }

    #[test]
    fn test_kind_from_data_type() {
        assert_eq!(ColumnKind::from_data_type(&DataType::Int32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_data_type(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::from_data_type(&DataType::LargeUtf8), ColumnKind::Textual);
        assert_eq!(ColumnKind::from_data_type(&DataType::Date32), ColumnKind::Other);
        assert_eq!(ColumnKind::from_data_type(&DataType::Null), ColumnKind::Other);
        assert_eq!(ColumnKind::Textual.to_string(), "textual");
    }

    #[test]
    fn test_missing_values_are_none() {
        let dataset = CsvDataset::from_csv_str("n,s\n1,a\n,\n3,c\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let n = &dataset.columns()[0];
        let s = &dataset.columns()[1];
        assert_eq!(n.missing_count(), 1);
        assert_eq!(s.missing_count(), 1);
        assert_eq!(n.present_count(), 2);
        assert_eq!(dataset.row(1), Some(vec![None, None]));
    }

    #[test]
    fn test_whitespace_only_is_present() {
        let dataset = CsvDataset::from_csv_str("s\nabc\n\"   \"\n\"\"\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let s = &dataset.columns()[0];
        assert_eq!(s.kind(), ColumnKind::Textual);
        assert_eq!(s.values()[1].as_deref(), Some("   "));
        assert_eq!(s.values()[2], None);
        assert_eq!(s.missing_count(), 1);
    }

    #[test]
    fn test_leading_whitespace_preserved() {
        let dataset = CsvDataset::from_csv_str("s\n x\nx \n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let values: Vec<&str> = dataset.columns()[0].present_values().collect();
        assert_eq!(values, vec![" x", "x "]);
    }

    #[test]
    fn test_duplicate_header_names_kept() {
        let dataset = CsvDataset::from_csv_str("a,a,b\n1,2,3\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        assert_eq!(dataset.column_names(), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_header_only_is_empty_file() {
        let result = CsvDataset::from_csv_str("a,b,c\n");
        assert!(matches!(
            result,
            Err(Error::EmptyFile {
                reason: "no data rows",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_string_is_empty_file() {
        let result = CsvDataset::from_csv_str("");
        assert!(matches!(result, Err(Error::EmptyFile { .. })));
    }

    #[test]
    fn test_ragged_rows_are_invalid_format() {
        let result = CsvDataset::from_csv_str("a,b\n1,2\n3,4,5\n");
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_out_of_range_dates_load_as_text() {
        for csv in [
            "d,x\n2024-01-01,a\n2024-13-01,b\n",
            "d,name\n2024-02-30,a\n2024-01-01,b\n",
            "ts,x\n2024-01-01T10:00:00,a\n2024-01-01T25:00:00,b\n",
        ] {
            let dataset =
                CsvDataset::from_csv_str(csv).unwrap_or_else(|e| panic!("Should parse {csv:?}: {e}"));
            let column = &dataset.columns()[0];
            assert_eq!(column.data_type(), &DataType::Utf8);
            assert_eq!(column.kind(), ColumnKind::Textual);
            assert_eq!(column.present_count(), 2);
        }
    }

    #[test]
    fn test_valid_dates_are_kept_verbatim() {
        let dataset = CsvDataset::from_csv_str("d\n2024-01-01\n\n2024-03-15\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let column = &dataset.columns()[0];
        assert_eq!(column.kind(), ColumnKind::Textual);
        assert_eq!(
            column.values(),
            &[Some("2024-01-01".to_string()), None, Some("2024-03-15".to_string())]
        );
    }

    #[test]
    fn test_overflowing_integer_still_loads() {
        let dataset = CsvDataset::from_csv_str("n,s\n1,a\n99999999999999999999999,b\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let column = &dataset.columns()[0];
        assert_eq!(column.present_count(), 2);
        assert_eq!(column.values()[1].as_deref(), Some("99999999999999999999999"));
        assert_eq!(dataset.columns()[1].kind(), ColumnKind::Textual);
    }

    #[test]
    fn test_ragged_rows_with_typed_columns_still_invalid() {
        let result = CsvDataset::from_csv_str("a,b\n1,2\n3,4\n5\n");
        assert!(matches!(result, Err(Error::InvalidFormat { .. })));
    }

    #[test]
    fn test_row_out_of_bounds() {
        let dataset =
            CsvDataset::from_csv_str("a\n1\n").unwrap_or_else(|e| panic!("Should parse: {e}"));
        assert!(dataset.row(0).is_some());
        assert!(dataset.row(1).is_none());
    }

    #[test]
    fn test_rows_iterator_matches_row() {
        let dataset = CsvDataset::from_csv_str("a,b\n1,x\n2,y\n")
            .unwrap_or_else(|e| panic!("Should parse: {e}"));
        let rows: Vec<_> = dataset.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Some("1"), Some("x")]);
        assert_eq!(dataset.row(1), Some(rows[1].clone()));
    }
}
