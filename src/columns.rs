use std::collections::HashMap;

use log::{debug, warn};

use crate::parser::{ParserRegistry, ValueParser};

/// Default separator between tokens of a column-specification string.
pub const DEFAULT_SEPARATOR: char = ',';

/// The resolved ordered list of output columns plus per-column optional
/// parser assignment.
///
/// Built once at startup from a column-specification string such as
/// `"id,name,created:epoch-millis-to-local-datetime"`; immutable afterwards.
/// Column order is both the header order and the per-row extraction order;
/// duplicate names are allowed and preserved.
///
/// # Examples
///
/// ```
/// use record_csv::{columns::ColumnSpec, parser::ParserRegistry};
///
/// let spec = ColumnSpec::resolve("id,ts:epoch-millis-to-local-datetime", ',', ParserRegistry::default());
///
/// assert_eq!(spec.names(), ["id", "ts"]);
/// assert!(spec.parser_for("id").is_none());
/// assert!(spec.parser_for("ts").is_some());
/// ```
pub struct ColumnSpec {
    names: Vec<String>,
    column_to_parser: HashMap<String, String>,
    registry: ParserRegistry,
}

impl ColumnSpec {
    /// Resolves a column-specification string against a parser registry.
    ///
    /// Each token is either a bare column name or `name:parserId`, split at
    /// the first `:`. The name keeps the token's position. An unknown
    /// `parserId` registers nothing and the column falls back to generic
    /// value inference; a warning is logged because a misspelled identifier
    /// is otherwise easy to miss. Empty tokens are dropped.
    pub fn resolve(spec: &str, separator: char, registry: ParserRegistry) -> Self {
        let mut names = Vec::new();
        let mut column_to_parser = HashMap::new();

        for token in spec.split(separator).filter(|token| !token.is_empty()) {
            match token.split_once(':') {
                Some((name, parser_id)) => {
                    if registry.contains(parser_id) {
                        column_to_parser.insert(name.to_string(), parser_id.to_string());
                    } else {
                        warn!(
                            "unknown parser id '{}' for column '{}', falling back to value inference",
                            parser_id, name
                        );
                    }
                    names.push(name.to_string());
                }
                None => names.push(token.to_string()),
            }
        }

        debug!("resolved columns: {:?}", names);

        Self {
            names,
            column_to_parser,
            registry,
        }
    }

    /// Column names in output order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The parser assigned to a column, if any.
    pub fn parser_for(&self, column: &str) -> Option<&ValueParser> {
        self.column_to_parser
            .get(column)
            .and_then(|id| self.registry.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnSpec, DEFAULT_SEPARATOR};
    use crate::parser::{EPOCH_MILLIS_TO_LOCAL_DATETIME, ParserRegistry};

    #[test]
    fn bare_tokens_resolve_unchanged_with_no_parsers() {
        let spec = ColumnSpec::resolve("id,name,score", DEFAULT_SEPARATOR, ParserRegistry::default());

        assert_eq!(spec.names(), ["id", "name", "score"]);
        assert!(spec.parser_for("id").is_none());
        assert!(spec.parser_for("name").is_none());
        assert!(spec.parser_for("score").is_none());
    }

    #[test]
    fn known_parser_id_is_assigned_to_its_column() {
        let spec = ColumnSpec::resolve(
            &format!("id,ts:{}", EPOCH_MILLIS_TO_LOCAL_DATETIME),
            DEFAULT_SEPARATOR,
            ParserRegistry::default(),
        );

        assert_eq!(spec.names(), ["id", "ts"]);
        assert!(spec.parser_for("ts").is_some());
    }

    #[test]
    fn unknown_parser_id_keeps_the_name_and_registers_nothing() {
        let spec = ColumnSpec::resolve(
            "name:unknownId",
            DEFAULT_SEPARATOR,
            ParserRegistry::default(),
        );

        assert_eq!(spec.names(), ["name"]);
        assert!(spec.parser_for("name").is_none());
    }

    #[test]
    fn token_splits_at_the_first_colon_only() {
        let spec = ColumnSpec::resolve("a:b:c", DEFAULT_SEPARATOR, ParserRegistry::default());

        // parser id is "b:c", which is unknown
        assert_eq!(spec.names(), ["a"]);
        assert!(spec.parser_for("a").is_none());
    }

    #[test]
    fn duplicate_columns_are_preserved_in_order() {
        let spec = ColumnSpec::resolve("id,name,id", DEFAULT_SEPARATOR, ParserRegistry::default());
        assert_eq!(spec.names(), ["id", "name", "id"]);
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let spec = ColumnSpec::resolve("id,,name,", DEFAULT_SEPARATOR, ParserRegistry::default());
        assert_eq!(spec.names(), ["id", "name"]);
    }

    #[test]
    fn custom_separator_is_honored() {
        let spec = ColumnSpec::resolve("id;name", ';', ParserRegistry::default());
        assert_eq!(spec.names(), ["id", "name"]);
    }
}
