//! Parsing of operator-supplied values.

use chrono::NaiveDate;
use connect_model::{ConceptId, FieldValue};

/// A `field=value` pair from `edit --set`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: FieldValue,
}

/// Parse `field=value`.
///
/// Values that are all digits become concept codes, `null` clears the field,
/// `true`/`false` are booleans and anything else is text. Wrap a value in
/// double quotes to force text.
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok(Assignment {
        field: field.to_string(),
        value: parse_value(value.trim()),
    })
}

fn parse_value(value: &str) -> FieldValue {
    if let Some(text) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return FieldValue::from(text);
    }
    match value {
        "null" => FieldValue::Null,
        "true" => FieldValue::Bool(true),
        "false" => FieldValue::Bool(false),
        _ => match value.parse::<ConceptId>() {
            Ok(code) if value.bytes().all(|b| b.is_ascii_digit()) => code.into(),
            _ => FieldValue::from(value),
        },
    }
}

/// Connect IDs are ten-digit numbers.
pub fn parse_connect_id(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{raw}' is not a ten-digit Connect ID"));
    }
    trimmed
        .parse()
        .map_err(|_| format!("'{raw}' is not a ten-digit Connect ID"))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is not a YYYY-MM-DD date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_values() {
        let code = parse_assignment("bloodFlag=353358909").unwrap();
        assert_eq!(code.field, "bloodFlag");
        assert_eq!(code.value, ConceptId::new(353358909).into());

        let text = parse_assignment("lastName = Byron").unwrap();
        assert_eq!(text.value, FieldValue::from("Byron"));

        let quoted = parse_assignment(r#"studyId="0042""#).unwrap();
        assert_eq!(quoted.value, FieldValue::from("0042"));

        assert_eq!(parse_assignment("x=null").unwrap().value, FieldValue::Null);
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("lastName").is_err());
    }

    #[test]
    fn connect_ids_are_ten_digits() {
        assert_eq!(parse_connect_id("1234567890").unwrap(), 1234567890);
        assert!(parse_connect_id("12345").is_err());
        assert!(parse_connect_id("12345678ab").is_err());
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_date("2024-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
        assert!(parse_date("03/09/2024").is_err());
    }
}
