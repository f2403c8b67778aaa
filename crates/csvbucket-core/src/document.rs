//! Stored Document
//!
//! The document is the single unit of persistence: every record ever written,
//! in insertion order, serialized as CSV under a fixed header.
//!
//! ```text
//! nombre,edad,altura
//! Ana,30,1.65
//! Luis,40,1.8
//! ```
//!
//! Decoding is lenient. The object can be edited outside this service, so
//! blank lines and malformed rows (wrong column count, unterminated quote)
//! are skipped instead of failing the request. Well-formed rows are kept
//! verbatim as text and written back unchanged on the next append.

use crate::csv;
use crate::record::Record;

/// Column names of the first line of every stored document.
pub const HEADER: [&str; 3] = ["nombre", "edad", "altura"];

/// UTF-8 byte order mark some spreadsheet tools prepend on export.
const BOM: char = '\u{feff}';

/// One data row as stored text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub nombre: String,
    pub edad: String,
    pub altura: String,
}

impl Row {
    pub fn new(
        nombre: impl Into<String>,
        edad: impl Into<String>,
        altura: impl Into<String>,
    ) -> Self {
        Self {
            nombre: nombre.into(),
            edad: edad.into(),
            altura: altura.into(),
        }
    }

    /// Build a row from raw CSV fields; `None` unless there are exactly three.
    pub fn from_fields(fields: Vec<String>) -> Option<Self> {
        let [nombre, edad, altura]: [String; 3] = fields.try_into().ok()?;
        Some(Self {
            nombre,
            edad,
            altura,
        })
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.nombre, &self.edad, &self.altura]
    }

    fn is_header(&self) -> bool {
        self.fields()
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
    }
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Self::new(record.nombre(), record.edad_text(), record.altura_text())
    }
}

/// Result of decoding a stored payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub document: Document,
    /// Non-blank records that were dropped as malformed
    pub skipped: usize,
}

/// Ordered data rows of the stored CSV object (header excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// An empty document: header only, no data rows.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Append a validated record and return the new row count.
    pub fn append(&mut self, record: &Record) -> usize {
        self.push(Row::from(record));
        self.len()
    }

    /// Decode a stored CSV payload.
    ///
    /// A leading byte order mark is ignored. The first well-formed record is
    /// dropped when it is the header.
    pub fn decode(text: &str) -> Decoded {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut rows = Vec::new();
        let mut skipped = 0;

        for fields in csv::read_records(text) {
            match Row::from_fields(fields) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        if rows.first().is_some_and(Row::is_header) {
            rows.remove(0);
        }

        Decoded {
            document: Self { rows },
            skipped,
        }
    }

    /// Encode header plus all rows as CSV text.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        csv::write_record(&mut out, &HEADER);
        for row in &self.rows {
            csv::write_record(&mut out, &row.fields());
        }
        out
    }
}
