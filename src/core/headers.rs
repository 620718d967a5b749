//! Parser for the newline-delimited extra-headers input.

use std::collections::BTreeMap;

use crate::error::ParseError;

/// Parse the raw `extra-headers` input into a header map.
///
/// Header names are lower-cased; values keep their original case. A
/// duplicated name keeps the last occurrence. An absent input yields an
/// empty map, not an error.
///
/// # Errors
///
/// Returns `ParseError::MalformedHeader` for a non-empty line without a
/// `:` separator. A header the caller asked for is never silently
/// dropped.
pub fn parse_headers_input(raw: Option<&str>) -> Result<BTreeMap<String, String>, ParseError> {
    let mut headers = BTreeMap::new();
    let Some(raw) = raw else {
        return Ok(headers);
    };

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
        headers.insert(name.trim().to_lowercase(), value.trim().to_string());
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_header() {
        let headers = parse_headers_input(Some("TEST: 1")).unwrap();
        assert_eq!(headers.get("test").map(String::as_str), Some("1"));
    }

    #[test]
    fn parses_header_with_surrounding_whitespace() {
        let headers = parse_headers_input(Some(
            "
            TEST: 1
            ",
        ))
        .unwrap();
        assert_eq!(headers.get("test").map(String::as_str), Some("1"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn parses_multiple_headers() {
        let headers = parse_headers_input(Some(
            "
            TEST: 1
            FOO: bAr
            ",
        ))
        .unwrap();
        assert_eq!(headers.get("test").map(String::as_str), Some("1"));
        assert_eq!(headers.get("foo").map(String::as_str), Some("bAr"));
    }

    #[test]
    fn absent_input_yields_empty_map() {
        let headers = parse_headers_input(None).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn lowercases_names_but_preserves_value_case() {
        let headers = parse_headers_input(Some("X-Custom-Header: CaSeD vAlUe")).unwrap();
        assert_eq!(
            headers.get("x-custom-header").map(String::as_str),
            Some("CaSeD vAlUe")
        );
    }

    #[test]
    fn duplicate_names_keep_last_value() {
        let headers = parse_headers_input(Some("a: first\nA: second")).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("a").map(String::as_str), Some("second"));
    }

    #[test]
    fn value_may_contain_colons() {
        let headers = parse_headers_input(Some("authorization: Bearer a:b:c")).unwrap();
        assert_eq!(
            headers.get("authorization").map(String::as_str),
            Some("Bearer a:b:c")
        );
    }

    #[test]
    fn line_without_separator_fails() {
        let err = parse_headers_input(Some("no separator here")).unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader(_)));
        assert!(err.to_string().contains("no separator here"));
    }
}
