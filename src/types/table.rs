//! Tabular data structures for the inference pipeline

/// An input dataset exactly as read from disk: a header row naming each
/// column plus row-major cells kept as text. Numeric interpretation is
/// deliberately deferred to the schema aligner.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column names, from the header row of the CSV file.
    pub headers: Vec<String>,
    /// Each data row, one string per field.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from a header row and data rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns named by the header.
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Position of a named column, if the header contains it.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of one column, top to bottom. Rows shorter than the header
    /// yield empty cells rather than panicking.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// A typed column of an aligned table. Categorical-indicator columns are
/// integer-typed; everything else is integer or float depending on what
/// the stored values look like.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Column::Int(_))
    }

    /// Cell value as `f64`, the representation the classifier consumes.
    pub fn value(&self, row: usize) -> f64 {
        match self {
            Column::Int(v) => v[row] as f64,
            Column::Float(v) => v[row],
        }
    }
}

/// A table whose columns are exactly the classifier's expected feature
/// list, in that exact order, every value numeric.
#[derive(Debug, Clone)]
pub struct AlignedTable {
    columns: Vec<String>,
    data: Vec<Column>,
}

impl AlignedTable {
    /// Assemble an aligned table. Callers guarantee one data column per
    /// name and equal lengths; the aligner's post-condition check guards
    /// the column sequence itself.
    pub fn new(columns: Vec<String>, data: Vec<Column>) -> Self {
        debug_assert_eq!(columns.len(), data.len());
        Self { columns, data }
    }

    /// Column names, in classifier order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.data.first().map(Column::len).unwrap_or(0)
    }

    /// Typed storage for a named column.
    pub fn column(&self, name: &str) -> Option<&Column> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.data.get(idx)
    }

    /// One row as the feature vector the classifier consumes, in column
    /// order.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.iter().map(|col| col.value(row)).collect()
    }
}
