use std::str::FromStr;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::FormatError;

/// A named preset of delimiter/quoting/line-ending conventions.
///
/// Unknown dialect names fail fast at startup; this is a one-time
/// configuration check, never a per-record path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Comma-separated, double-quoted, CRLF rows.
    Plain,
    /// Excel-compatible CSV. The default dialect.
    #[default]
    Excel,
    /// Strict RFC 4180.
    Rfc4180,
    /// Tab-separated, backslash-escaped, LF rows, no quoting.
    Mysql,
    /// Tab-delimited format.
    Tdf,
}

impl Dialect {
    fn delimiter(self) -> u8 {
        match self {
            Dialect::Mysql | Dialect::Tdf => b'\t',
            _ => b',',
        }
    }

    fn terminator(self) -> Terminator {
        match self {
            Dialect::Mysql => Terminator::Any(b'\n'),
            _ => Terminator::CRLF,
        }
    }

    fn quote(self) -> u8 {
        b'"'
    }

    fn quote_mode(self) -> QuoteMode {
        match self {
            Dialect::Mysql => QuoteMode::None,
            _ => QuoteMode::Minimal,
        }
    }

    fn escape(self) -> Option<u8> {
        match self {
            Dialect::Mysql => Some(b'\\'),
            _ => None,
        }
    }
}

impl FromStr for Dialect {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "plain" => Ok(Dialect::Plain),
            "excel" => Ok(Dialect::Excel),
            "rfc4180" => Ok(Dialect::Rfc4180),
            "mysql" => Ok(Dialect::Mysql),
            "tdf" => Ok(Dialect::Tdf),
            other => Err(FormatError::Configuration(format!(
                "unknown csv dialect '{}'",
                other
            ))),
        }
    }
}

/// Which cells get quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// Quote only cells containing the delimiter, the quote or a line break.
    Minimal,
    /// Quote every cell.
    All,
    /// Quote everything that is not a number.
    NonNumeric,
    /// Never quote; relies on the dialect's escape character.
    None,
}

impl QuoteMode {
    fn style(self) -> QuoteStyle {
        match self {
            QuoteMode::Minimal => QuoteStyle::Necessary,
            QuoteMode::All => QuoteStyle::Always,
            QuoteMode::NonNumeric => QuoteStyle::NonNumeric,
            QuoteMode::None => QuoteStyle::Never,
        }
    }
}

impl FromStr for QuoteMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(QuoteMode::Minimal),
            "all" => Ok(QuoteMode::All),
            "non_numeric" | "non-numeric" => Ok(QuoteMode::NonNumeric),
            "none" => Ok(QuoteMode::None),
            other => Err(FormatError::Configuration(format!(
                "unknown quote mode '{}'",
                other
            ))),
        }
    }
}

/// Writer configuration, resolved once at startup and immutable afterwards.
///
/// Built either through [`OutputFormatBuilder`] or from named string options
/// with [`OutputFormat::from_options`]. Options left unset take the
/// dialect's preset values.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    dialect: Dialect,
    with_header: bool,
    record_separator: Option<Terminator>,
    quote: Option<u8>,
    quote_mode: Option<QuoteMode>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormatBuilder::new().build()
    }
}

impl OutputFormat {
    /// Resolves named string options, the shape they arrive in from
    /// process-wide settings.
    ///
    /// Recognized keys: `dialect`, `withHeader`, `recordSeparator`,
    /// `quoteChar`, `quoteMode`. Anything else is a fatal configuration
    /// error, as is an unknown dialect or quote mode name.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_csv::output::OutputFormat;
    ///
    /// let format = OutputFormat::from_options([
    ///     ("dialect", "tdf"),
    ///     ("withHeader", "false"),
    ///     ("quoteMode", "all"),
    /// ]).unwrap();
    ///
    /// assert!(!format.with_header());
    /// assert!(OutputFormat::from_options([("dialect", "lotus123")]).is_err());
    /// ```
    pub fn from_options<'a, I>(options: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = OutputFormatBuilder::new();

        for (key, value) in options {
            builder = match key {
                "dialect" => builder.dialect(value.parse()?),
                "withHeader" => builder.with_header(value.eq_ignore_ascii_case("true")),
                "recordSeparator" => builder.record_separator(parse_record_separator(value)?),
                "quoteChar" => builder.quote(parse_quote_char(value)?),
                "quoteMode" => builder.quote_mode(value.parse()?),
                other => {
                    return Err(FormatError::Configuration(format!(
                        "unrecognized output option '{}'",
                        other
                    )));
                }
            };
        }

        Ok(builder.build())
    }

    pub fn with_header(&self) -> bool {
        self.with_header
    }

    /// The `csv` writer builder carrying the fully resolved settings.
    pub(crate) fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.dialect.delimiter())
            .terminator(self.record_separator.unwrap_or(self.dialect.terminator()))
            .quote(self.quote.unwrap_or(self.dialect.quote()))
            .quote_style(self.quote_mode.unwrap_or(self.dialect.quote_mode()).style())
            .has_headers(false)
            .flexible(false);

        if let Some(escape) = self.dialect.escape() {
            builder.escape(escape).double_quote(false);
        }

        builder
    }
}

fn parse_record_separator(value: &str) -> Result<Terminator, FormatError> {
    match value.as_bytes() {
        b"\r\n" => Ok(Terminator::CRLF),
        [byte] => Ok(Terminator::Any(*byte)),
        _ => Err(FormatError::Configuration(format!(
            "record separator must be a single character or CRLF, got '{}'",
            value.escape_debug()
        ))),
    }
}

fn parse_quote_char(value: &str) -> Result<u8, FormatError> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(FormatError::Configuration(format!(
            "quote character must be a single character, got '{}'",
            value
        ))),
    }
}

/// Builder for [`OutputFormat`], for callers configuring the writer in code
/// rather than from named options.
#[derive(Debug, Default)]
pub struct OutputFormatBuilder {
    dialect: Dialect,
    with_header: bool,
    record_separator: Option<Terminator>,
    quote: Option<u8>,
    quote_mode: Option<QuoteMode>,
}

impl OutputFormatBuilder {
    pub fn new() -> Self {
        Self {
            dialect: Dialect::default(),
            with_header: true,
            record_separator: None,
            quote: None,
            quote_mode: None,
        }
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_header(mut self, yes: bool) -> Self {
        self.with_header = yes;
        self
    }

    /// Overrides the dialect's line terminator.
    pub fn record_separator(mut self, terminator: Terminator) -> Self {
        self.record_separator = Some(terminator);
        self
    }

    /// Overrides the dialect's quote character.
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Overrides the dialect's quoting rule.
    pub fn quote_mode(mut self, mode: QuoteMode) -> Self {
        self.quote_mode = Some(mode);
        self
    }

    pub fn build(self) -> OutputFormat {
        OutputFormat {
            dialect: self.dialect,
            with_header: self.with_header,
            record_separator: self.record_separator,
            quote: self.quote,
            quote_mode: self.quote_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dialect, OutputFormat, QuoteMode};

    #[test]
    fn defaults_are_excel_with_header() {
        let format = OutputFormat::default();
        assert!(format.with_header());
    }

    #[test]
    fn dialect_names_are_case_insensitive() {
        assert_eq!("EXCEL".parse::<Dialect>().unwrap(), Dialect::Excel);
        assert_eq!("MySQL".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("rfc4180".parse::<Dialect>().unwrap(), Dialect::Rfc4180);
    }

    #[test]
    fn unknown_dialect_is_a_configuration_error() {
        assert!("lotus123".parse::<Dialect>().is_err());
    }

    #[test]
    fn quote_mode_names_resolve() {
        assert_eq!("minimal".parse::<QuoteMode>().unwrap(), QuoteMode::Minimal);
        assert_eq!("ALL".parse::<QuoteMode>().unwrap(), QuoteMode::All);
        assert_eq!(
            "non_numeric".parse::<QuoteMode>().unwrap(),
            QuoteMode::NonNumeric
        );
        assert!("sometimes".parse::<QuoteMode>().is_err());
    }

    #[test]
    fn from_options_resolves_every_recognized_key() {
        let format = OutputFormat::from_options([
            ("dialect", "rfc4180"),
            ("withHeader", "FALSE"),
            ("recordSeparator", "\n"),
            ("quoteChar", "'"),
            ("quoteMode", "all"),
        ])
        .unwrap();

        assert!(!format.with_header());
    }

    #[test]
    fn header_flag_follows_java_boolean_semantics() {
        // anything that is not "true" (case-insensitively) disables the header
        let format = OutputFormat::from_options([("withHeader", "yes")]).unwrap();
        assert!(!format.with_header());

        let format = OutputFormat::from_options([("withHeader", "TRUE")]).unwrap();
        assert!(format.with_header());
    }

    #[test]
    fn unrecognized_option_key_is_rejected() {
        assert!(OutputFormat::from_options([("lineWidth", "80")]).is_err());
    }

    #[test]
    fn multi_character_separator_or_quote_is_rejected() {
        assert!(OutputFormat::from_options([("recordSeparator", "::")]).is_err());
        assert!(OutputFormat::from_options([("recordSeparator", "\r\n")]).is_ok());
        assert!(OutputFormat::from_options([("quoteChar", "''")]).is_err());
    }
}
