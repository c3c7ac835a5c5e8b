//! Small shared helpers for decoding query parameters.

use std::collections::HashMap;

use crate::error::ParseError;

/// Decode a boolean mode flag such as `?local=true`.
///
/// Absent, empty, and `"false"` all mean `false`; `"true"` means `true`;
/// anything else is an invalid-input error.
pub fn parse_bool_flag(name: &str, value: Option<&str>) -> Result<bool, ParseError> {
    match value {
        None | Some("") | Some("false") => Ok(false),
        Some("true") => Ok(true),
        Some(other) => Err(ParseError::InvalidFlag {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Decode an optional integer query option, distinguishing "absent" from
/// "present but malformed".
pub(crate) fn parse_i32_option(
    query: &HashMap<String, String>,
    name: &str,
) -> Result<Option<i32>, ParseError> {
    match query.get(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ParseError::InvalidOption {
                name: name.to_string(),
                value: raw.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_flag_accepts_true_false_and_absent() {
        assert!(!parse_bool_flag("local", None).unwrap());
        assert!(!parse_bool_flag("local", Some("")).unwrap());
        assert!(!parse_bool_flag("local", Some("false")).unwrap());
        assert!(parse_bool_flag("local", Some("true")).unwrap());
    }

    #[test]
    fn bool_flag_rejects_anything_else() {
        assert!(parse_bool_flag("local", Some("yes")).is_err());
        assert!(parse_bool_flag("local", Some("1")).is_err());
        assert!(parse_bool_flag("local", Some("TRUE")).is_err());
    }

    #[test]
    fn i32_option_distinguishes_absent_from_malformed() {
        let mut q = HashMap::new();
        assert_eq!(parse_i32_option(&q, "replication").unwrap(), None);
        q.insert("replication".to_string(), "-1".to_string());
        assert_eq!(parse_i32_option(&q, "replication").unwrap(), Some(-1));
        q.insert("replication".to_string(), "many".to_string());
        assert!(parse_i32_option(&q, "replication").is_err());
    }
}
