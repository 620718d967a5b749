//! Parser for the `secrets` selector mini-language.
//!
//! The raw input is a `;`-delimited list of clauses, each naming a secret
//! path and a key to pull out of its payload:
//!
//! ```text
//! ci/npm token; ci/deploy key | DEPLOY_KEY
//! ```
//!
//! A `| name` suffix maps the fetched value to an explicit name, used
//! verbatim for both the output value and the environment variable.
//! Without it, the key names the output value and its upper-cased form
//! names the environment variable.

use crate::error::ParseError;

/// One parsed selector clause: a single secret field to fetch and publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
    /// Store path of the secret, e.g. `ci/npm`.
    pub secret_path: String,
    /// Key (or dot/bracket path) into the secret's payload.
    pub secret_selector: String,
    /// Name of the output value to publish.
    pub output_var_name: String,
    /// Name of the environment variable to export.
    pub env_var_name: String,
    /// Whether `secret_selector` is a nested dot/bracket path.
    pub is_json_path: bool,
}

/// Parse the full selector string into fetch requests.
///
/// Clauses are split on `;`; empty clauses, including the trailing one
/// left by a terminating `;`, are dropped. The input may span multiple
/// lines; line breaks count as ordinary whitespace.
///
/// # Errors
///
/// Fails on the first malformed clause, naming it in the message.
pub fn parse_secrets_input(raw: &str) -> Result<Vec<SecretRequest>, ParseError> {
    raw.split(';')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(parse_clause)
        .collect()
}

/// Parse one trimmed, non-empty clause.
fn parse_clause(clause: &str) -> Result<SecretRequest, ParseError> {
    if let Some((before, after)) = clause.split_once('|') {
        let mapped = after.trim();
        if mapped.is_empty() {
            return Err(ParseError::MappedNameMissing(clause.to_string()));
        }
        let (secret_path, secret_selector) = split_path_and_key(before, clause)?;
        Ok(SecretRequest {
            is_json_path: is_json_path(&secret_selector),
            output_var_name: mapped.to_string(),
            env_var_name: mapped.to_string(),
            secret_path,
            secret_selector,
        })
    } else {
        let (secret_path, secret_selector) = split_path_and_key(clause, clause)?;
        Ok(SecretRequest {
            is_json_path: is_json_path(&secret_selector),
            output_var_name: secret_selector.clone(),
            env_var_name: secret_selector.to_uppercase(),
            secret_path,
            secret_selector,
        })
    }
}

/// Split `<path> <key>` on whitespace, requiring exactly two tokens.
///
/// `clause` is the full original clause, quoted in the error message.
fn split_path_and_key(raw: &str, clause: &str) -> Result<(String, String), ParseError> {
    let mut tokens = raw.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(path), Some(key), None) => Ok((path.to_string(), key.to_string())),
        _ => Err(ParseError::InvalidPathAndKey(clause.to_string())),
    }
}

/// A selector is a JSON path when it uses dot or bracket accessors.
fn is_json_path(selector: &str) -> bool {
    selector.contains('.') || selector.contains('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_secret() {
        let output = parse_secrets_input("test key").unwrap();
        assert_eq!(
            output,
            vec![SecretRequest {
                secret_path: "test".to_string(),
                secret_selector: "key".to_string(),
                output_var_name: "key".to_string(),
                env_var_name: "KEY".to_string(),
                is_json_path: false,
            }]
        );
    }

    #[test]
    fn parses_mapped_secret() {
        let output = parse_secrets_input("test key|testName").unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].output_var_name, "testName");
        assert_eq!(output[0].env_var_name, "testName");
    }

    #[test]
    fn fails_on_empty_mapped_name() {
        let err = parse_secrets_input("test key|").unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must provide a value when mapping a secret to a name. Input: \"test key|\""
        );
    }

    #[test]
    fn fails_on_missing_path_before_mapping() {
        let err = parse_secrets_input("|testName").unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must provide a valid path and key. Input: \"|testName\""
        );
    }

    #[test]
    fn fails_on_single_token_clause() {
        let err = parse_secrets_input("justapath").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPathAndKey(_)));
    }

    #[test]
    fn fails_on_three_token_clause() {
        let err = parse_secrets_input("path key extra").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPathAndKey(_)));
    }

    #[test]
    fn parses_multiple_secrets() {
        let output = parse_secrets_input("first a;second b;").unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].secret_path, "first");
        assert_eq!(output[1].secret_path, "second");
    }

    #[test]
    fn parses_mixed_plain_and_mapped() {
        let output = parse_secrets_input("first a;second b|secondName").unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].output_var_name, "a");
        assert_eq!(output[0].env_var_name, "A");
        assert_eq!(output[1].output_var_name, "secondName");
        assert_eq!(output[1].env_var_name, "secondName");
    }

    #[test]
    fn parses_multiline_input() {
        let output = parse_secrets_input(
            "
        first a;
        second b;
        third c | SOME_C;",
        )
        .unwrap();
        assert_eq!(output.len(), 3);
        assert_eq!(output[0].secret_path, "first");
        assert_eq!(output[1].output_var_name, "b");
        assert_eq!(output[1].env_var_name, "B");
        assert_eq!(output[2].output_var_name, "SOME_C");
        assert_eq!(output[2].env_var_name, "SOME_C");
    }

    #[test]
    fn tolerates_clause_spanning_a_line_break() {
        let output = parse_secrets_input("first\n a; second b").unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].secret_path, "first");
        assert_eq!(output[0].secret_selector, "a");
    }

    #[test]
    fn detects_json_path_selectors() {
        let output = parse_secrets_input("app db.password; app creds[0]; app plain").unwrap();
        assert!(output[0].is_json_path);
        assert!(output[1].is_json_path);
        assert!(!output[2].is_json_path);
    }

    #[test]
    fn mapped_name_keeps_case() {
        let output = parse_secrets_input("test key|MiXeD_case").unwrap();
        assert_eq!(output[0].output_var_name, "MiXeD_case");
        assert_eq!(output[0].env_var_name, "MiXeD_case");
    }

    #[test]
    fn splits_mapping_on_first_pipe() {
        let output = parse_secrets_input("test key|a|b").unwrap();
        assert_eq!(output[0].secret_selector, "key");
        assert_eq!(output[0].output_var_name, "a|b");
    }
}
