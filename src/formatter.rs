use std::{
    cell::{Cell, RefCell},
    io,
};

use csv::Writer;
use log::{error, warn};

use crate::{
    columns::ColumnSpec, error::FormatError, output::OutputFormat, record::Record,
    value::CellValue,
};

/// Converts one record at a time into a delimited output row.
///
/// Holds the resolved [`ColumnSpec`] and a long-lived `csv` writer; the
/// header row is written once at construction when the output format asks
/// for one. Call [`format`](RowFormatter::format) per record and
/// [`flush`](RowFormatter::flush) exactly once at the end so buffered rows
/// are not lost.
pub struct RowFormatter<W: io::Write> {
    columns: ColumnSpec,
    writer: RefCell<Writer<W>>,
    write_error_count: Cell<usize>,
}

impl<W: io::Write> RowFormatter<W> {
    /// Writes one row for the given record.
    ///
    /// For each column in order: no values yields an empty cell, a single
    /// value is coerced to a typed cell, several values are coerced
    /// independently and joined with `;`. A named-parser failure degrades
    /// that column's cell to empty and logs a diagnostic; the rest of the
    /// row is unaffected.
    ///
    /// A failure to write the row does not abort the batch: it is logged,
    /// counted in [`write_error_count`](RowFormatter::write_error_count)
    /// and otherwise swallowed. The output stream is the sole destination,
    /// so there is nothing to retry against.
    pub fn format(&self, record: &dyn Record) {
        let cells: Vec<CellValue> = self
            .columns
            .names()
            .iter()
            .map(|column| self.extract_cell(record, column))
            .collect();

        if let Err(err) = self.writer.borrow_mut().serialize(&cells) {
            self.write_error_count.set(self.write_error_count.get() + 1);
            error!("failed to write row: {}", err);
        }
    }

    fn extract_cell(&self, record: &dyn Record, column: &str) -> CellValue {
        let values = record.values(column);

        match self.parse_multivalue(column, values) {
            Ok(cell) => cell,
            Err(err) => {
                warn!(
                    "could not parse values {:?} for column '{}': {}",
                    values, column, err
                );
                CellValue::Empty
            }
        }
    }

    fn parse_multivalue(
        &self,
        column: &str,
        values: &[String],
    ) -> Result<CellValue, FormatError> {
        match values {
            [] => Ok(CellValue::Empty),
            [value] => self.coerce(column, value),
            values => {
                let mut parts = Vec::with_capacity(values.len());
                for value in values {
                    parts.push(self.coerce(column, value)?.to_string());
                }
                Ok(CellValue::Str(parts.join(";")))
            }
        }
    }

    fn coerce(&self, column: &str, value: &str) -> Result<CellValue, FormatError> {
        if let Some(parser) = self.columns.parser_for(column) {
            return parser(value).map_err(|source| FormatError::Parse {
                column: column.to_string(),
                source,
            });
        }

        Ok(CellValue::infer(value))
    }

    /// Rows that failed to reach the output stream so far.
    pub fn write_error_count(&self) -> usize {
        self.write_error_count.get()
    }

    /// Flush the contents of the internal buffer to the underlying writer.
    ///
    /// Note that this also flushes the underlying writer.
    pub fn flush(&self) -> Result<(), FormatError> {
        self.writer
            .borrow_mut()
            .flush()
            .map_err(|err| FormatError::Write(err.to_string()))
    }

    /// Flushes and unwraps the underlying writer.
    pub fn into_inner(self) -> Result<W, FormatError> {
        self.writer
            .into_inner()
            .into_inner()
            .map_err(|err| FormatError::Write(err.to_string()))
    }
}

/// Builder for [`RowFormatter`].
///
/// # Examples
///
/// ```
/// use record_csv::{
///     columns::ColumnSpec,
///     formatter::RowFormatterBuilder,
///     parser::ParserRegistry,
///     record::FieldMapRecord,
/// };
///
/// # fn main() -> Result<(), record_csv::FormatError> {
/// let columns = ColumnSpec::resolve("id,name,score", ',', ParserRegistry::default());
/// let formatter = RowFormatterBuilder::new(columns).from_writer(vec![])?;
///
/// let record = FieldMapRecord::new()
///     .with_value("id", "7")
///     .with_value("name", "neo")
///     .with_value("score", "3.14");
/// formatter.format(&record);
///
/// let data = String::from_utf8(formatter.into_inner()?).unwrap();
/// assert_eq!(data, "id,name,score\r\n7,neo,3.14\r\n");
/// # Ok(())
/// # }
/// ```
pub struct RowFormatterBuilder {
    columns: ColumnSpec,
    format: OutputFormat,
}

impl RowFormatterBuilder {
    pub fn new(columns: ColumnSpec) -> Self {
        Self {
            columns,
            format: OutputFormat::default(),
        }
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builds a formatter writing to `wtr`, typically standard output.
    ///
    /// Writes the header row immediately when the format asks for one; a
    /// header that cannot be written means the writer is unusable, which is
    /// fatal before any record is formatted.
    pub fn from_writer<W: io::Write>(self, wtr: W) -> Result<RowFormatter<W>, FormatError> {
        let mut writer = self.format.writer_builder().from_writer(wtr);

        if self.format.with_header() {
            writer
                .write_record(self.columns.names())
                .map_err(|err| {
                    FormatError::Configuration(format!("unable to write header row: {}", err))
                })?;
        }

        Ok(RowFormatter {
            columns: self.columns,
            writer: RefCell::new(writer),
            write_error_count: Cell::new(0),
        })
    }
}
