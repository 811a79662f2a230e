use std::fmt;

use serde::{Serialize, Serializer};

/// One coerced, render-ready value occupying a single row/column position.
///
/// The closed set of variants keeps the writer's serialization total: every
/// cell the formatter produces is one of these, so quoting decisions (for
/// example `QuoteMode::NonNumeric`) can distinguish numbers from text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Sentinel for an absent field, an empty raw value or a degraded cell.
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl CellValue {
    /// Coerces a raw field value to a typed cell without a named parser.
    ///
    /// Inference never fails; anything that is not empty, a boolean literal
    /// or a numeric literal stays a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use record_csv::value::CellValue;
    ///
    /// assert_eq!(CellValue::infer(""), CellValue::Empty);
    /// assert_eq!(CellValue::infer("TRUE"), CellValue::Bool(true));
    /// assert_eq!(CellValue::infer("42"), CellValue::Int(42));
    /// assert_eq!(CellValue::infer("3.14"), CellValue::Float(3.14));
    /// assert_eq!(CellValue::infer("abc"), CellValue::Str("abc".to_string()));
    /// ```
    pub fn infer(raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Empty;
        }

        if raw.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }

        if raw.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        if let Some(number) = parse_number(raw) {
            return number;
        }

        CellValue::Str(raw.to_string())
    }
}

/// Parses an optionally signed numeric literal, preserving the
/// integer-vs-floating distinction.
///
/// Accepts the common literal suffixes (`l`/`L` for integers, `f`/`F`/`d`/`D`
/// for floats) and `0x` hexadecimal integers. Words that `f64` would happily
/// parse but are not numeric literals (`inf`, `nan`) are rejected.
fn parse_number(raw: &str) -> Option<CellValue> {
    let negative = raw.starts_with('-');
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);

    if let Some(digits) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let magnitude = i64::from_str_radix(digits, 16).ok()?;
        return Some(CellValue::Int(if negative { -magnitude } else { magnitude }));
    }

    // Literals start with a digit or a decimal point.
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    if let Some(body) = raw.strip_suffix(['l', 'L']) {
        return body.parse::<i64>().ok().map(CellValue::Int);
    }

    if let Ok(integer) = raw.parse::<i64>() {
        return Some(CellValue::Int(integer));
    }

    let body = raw.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(raw);
    let float = body.parse::<f64>().ok()?;
    float.is_finite().then_some(CellValue::Float(float))
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Float(value) => write!(f, "{}", value),
            CellValue::Str(value) => f.write_str(value),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Bool(value) => serializer.serialize_bool(*value),
            CellValue::Int(value) => serializer.serialize_i64(*value),
            CellValue::Float(value) => serializer.serialize_f64(*value),
            CellValue::Str(value) => serializer.serialize_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CellValue;

    #[test]
    fn empty_value_is_the_empty_sentinel() {
        assert_eq!(CellValue::infer(""), CellValue::Empty);
    }

    #[test]
    fn boolean_literals_are_case_insensitive() {
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("False"), CellValue::Bool(false));
    }

    #[test]
    fn integers_keep_the_integer_distinction() {
        assert_eq!(CellValue::infer("42"), CellValue::Int(42));
        assert_eq!(CellValue::infer("+7"), CellValue::Int(7));
        assert_eq!(CellValue::infer("-13"), CellValue::Int(-13));
    }

    #[test]
    fn integer_suffix_and_hex_literals_parse_as_integers() {
        assert_eq!(CellValue::infer("42L"), CellValue::Int(42));
        assert_eq!(CellValue::infer("0x1F"), CellValue::Int(31));
        assert_eq!(CellValue::infer("-0x10"), CellValue::Int(-16));
    }

    #[test]
    fn floats_parse_with_fraction_exponent_and_suffix() {
        assert_eq!(CellValue::infer("3.14"), CellValue::Float(3.14));
        assert_eq!(CellValue::infer("-2.5e3"), CellValue::Float(-2500.0));
        assert_eq!(CellValue::infer(".5"), CellValue::Float(0.5));
        assert_eq!(CellValue::infer("3.14f"), CellValue::Float(3.14));
        assert_eq!(CellValue::infer("5d"), CellValue::Float(5.0));
    }

    #[test]
    fn non_literals_stay_strings() {
        assert_eq!(CellValue::infer("abc"), CellValue::Str("abc".to_string()));
        assert_eq!(CellValue::infer("inf"), CellValue::Str("inf".to_string()));
        assert_eq!(CellValue::infer("nan"), CellValue::Str("nan".to_string()));
        assert_eq!(CellValue::infer("-"), CellValue::Str("-".to_string()));
        assert_eq!(CellValue::infer("."), CellValue::Str(".".to_string()));
        assert_eq!(CellValue::infer("1x"), CellValue::Str("1x".to_string()));
        assert_eq!(
            CellValue::infer("12 monkeys"),
            CellValue::Str("12 monkeys".to_string())
        );
    }

    #[test]
    fn display_stringifies_heterogeneous_cells() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Float(3.14).to_string(), "3.14");
        assert_eq!(CellValue::Str("abc".to_string()).to_string(), "abc");
    }
}
