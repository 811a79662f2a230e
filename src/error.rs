use thiserror::Error;

/// Error raised by a named value parser when it rejects a raw field value.
///
/// Parse failures are recovered at column granularity: the affected cell
/// degrades to the empty-string sentinel instead of aborting the row.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Formatting error
#[derive(Error, Debug)]
pub enum FormatError {
    /// Fatal startup error: unknown dialect or quote mode, unusable record
    /// separator or option key, or a writer that cannot emit the header row.
    /// Never raised on the per-record path.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A named parser rejected a value for the given column.
    #[error("unparseable value for column '{column}'")]
    Parse {
        column: String,
        #[source]
        source: ParseError,
    },

    /// Failure to emit buffered rows to the output stream.
    #[error("write error: {0}")]
    Write(String),
}
