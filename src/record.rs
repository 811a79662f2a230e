use std::collections::HashMap;

/// Input boundary: a named-field, multi-valued record retrieved from an
/// external document store.
///
/// Implementations return the ordered raw string values for a field, or an
/// empty slice when the field is absent. How records are obtained, indexed
/// or searched is outside this crate.
pub trait Record {
    fn values(&self, field: &str) -> &[String];
}

/// A [`Record`] backed by an owned field map, for callers that materialize
/// records by hand and for tests.
///
/// # Examples
///
/// ```
/// use record_csv::record::{FieldMapRecord, Record};
///
/// let record = FieldMapRecord::new()
///     .with_value("id", "7")
///     .with_values("tags", ["a", "b"]);
///
/// assert_eq!(record.values("id"), ["7"]);
/// assert_eq!(record.values("tags"), ["a", "b"]);
/// assert!(record.values("missing").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMapRecord {
    fields: HashMap<String, Vec<String>>,
}

impl FieldMapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value to the given field, preserving insertion order.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Appends several values to the given field at once.
    pub fn with_values<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.fields
            .entry(field.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

impl Record for FieldMapRecord {
    fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldMapRecord, Record};

    #[test]
    fn absent_field_yields_an_empty_slice() {
        let record = FieldMapRecord::new();
        assert!(record.values("anything").is_empty());
    }

    #[test]
    fn values_keep_insertion_order() {
        let record = FieldMapRecord::new()
            .with_value("tag", "first")
            .with_values("tag", ["second", "third"]);

        assert_eq!(record.values("tag"), ["first", "second", "third"]);
    }
}
