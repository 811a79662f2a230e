#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Record-CSV

 Converts records retrieved from a document store — each record exposing
 named, possibly multi-valued, string fields — into delimited text suitable
 for downstream tooling. One call, one row.

 ## Core Concepts

 - **[`Record`](record::Record):** the input boundary, a named-field
   multi-valued record supplied by an external record source.
 - **[`ColumnSpec`](columns::ColumnSpec):** the resolved ordered list of
   output columns plus per-column optional parser assignment, built once at
   startup from a specification string such as
   `"id,name,created:epoch-millis-to-local-datetime"`.
 - **[`ParserRegistry`](parser::ParserRegistry):** open registry of named
   value parsers; columns without one fall back to generic typed-value
   inference (empty, boolean, integer, float, string).
 - **[`OutputFormat`](output::OutputFormat):** writer configuration resolved
   once from named options (dialect preset, header flag, record separator,
   quote character, quote mode).
 - **[`RowFormatter`](formatter::RowFormatter):** extracts each column's
   values, coerces them to typed cells, joins multi-values with `;` and
   writes one row through the shared `csv` writer.

 ## Getting Started

```rust
use record_csv::{
    columns::{ColumnSpec, DEFAULT_SEPARATOR},
    formatter::RowFormatterBuilder,
    output::OutputFormat,
    parser::ParserRegistry,
    record::FieldMapRecord,
};

fn main() -> Result<(), record_csv::FormatError> {
    let columns = ColumnSpec::resolve(
        "id,active,balance",
        DEFAULT_SEPARATOR,
        ParserRegistry::default(),
    );

    let format = OutputFormat::from_options([("withHeader", "true")])?;

    let formatter = RowFormatterBuilder::new(columns)
        .output_format(format)
        .from_writer(vec![])?; // typically io::stdout()

    let record = FieldMapRecord::new()
        .with_value("id", "7")
        .with_value("active", "true")
        .with_value("balance", "12.50");
    formatter.format(&record);

    let data = String::from_utf8(formatter.into_inner()?).unwrap();
    assert_eq!(data, "id,active,balance\r\n7,true,12.5\r\n");

    Ok(())
}
```

 ## Error Handling

 Configuration problems (unknown dialect or quote mode, unusable writer) are
 fatal at startup, before any row is written. Per-value parser failures
 degrade the affected column's cell to the empty-string sentinel and log a
 diagnostic. Per-row write failures are logged and counted but do not abort
 the batch; see
 [`RowFormatter::write_error_count`](formatter::RowFormatter::write_error_count).
 Nothing is retried.
 */

/// Column-specification resolution
pub mod columns;

/// Error types for configuration, parsing and writing
pub mod error;

/// Per-record row formatting
pub mod formatter;

/// Output-format configuration resolution
pub mod output;

/// Named value-parser registry
pub mod parser;

/// Input record boundary
pub mod record;

/// Typed cell values and generic coercion
pub mod value;

#[doc(inline)]
pub use error::*;
