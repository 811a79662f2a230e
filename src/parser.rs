use std::collections::HashMap;

use chrono::{Local, TimeZone};

use crate::{error::ParseError, value::CellValue};

/// A pure named parser: raw field value in, typed cell out.
pub type ValueParser = Box<dyn Fn(&str) -> Result<CellValue, ParseError> + Send + Sync>;

/// Identifier of the seeded epoch-millis parser.
pub const EPOCH_MILLIS_TO_LOCAL_DATETIME: &str = "epoch-millis-to-local-datetime";

/// Open registry of named value parsers, keyed by the identifier used in
/// column-specification tokens (`name:parserId`).
///
/// New parsers can be registered without touching the coercion dispatch in
/// the row formatter.
///
/// # Examples
///
/// ```
/// use record_csv::{parser::ParserRegistry, value::CellValue};
///
/// let mut registry = ParserRegistry::default();
/// registry.register("shout", Box::new(|raw| Ok(CellValue::Str(raw.to_uppercase()))));
///
/// let parser = registry.get("shout").unwrap();
/// assert_eq!(parser("abc").unwrap(), CellValue::Str("ABC".to_string()));
/// ```
pub struct ParserRegistry {
    parsers: HashMap<String, ValueParser>,
}

impl ParserRegistry {
    /// Creates a registry with no parsers at all.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registers a parser under the given identifier, replacing any previous
    /// parser with the same identifier.
    pub fn register(&mut self, id: impl Into<String>, parser: ValueParser) {
        self.parsers.insert(id.into(), parser);
    }

    pub fn get(&self, id: &str) -> Option<&ValueParser> {
        self.parsers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.parsers.contains_key(id)
    }
}

impl Default for ParserRegistry {
    /// Registry seeded with [`EPOCH_MILLIS_TO_LOCAL_DATETIME`].
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            EPOCH_MILLIS_TO_LOCAL_DATETIME,
            Box::new(epoch_millis_to_local_datetime),
        );
        registry
    }
}

/// Interprets the raw value as base-10 milliseconds since the epoch and
/// renders it as an ISO-8601 local date-time in the system time zone.
fn epoch_millis_to_local_datetime(raw: &str) -> Result<CellValue, ParseError> {
    let millis: i64 = raw
        .parse()
        .map_err(|_| ParseError(format!("'{}' is not a whole number of milliseconds", raw)))?;

    let datetime = Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ParseError(format!("timestamp {} is out of range", millis)))?;

    Ok(CellValue::Str(
        datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
    ))
}
