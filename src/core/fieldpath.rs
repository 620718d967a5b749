//! Dot/bracket path evaluation over decoded JSON values.
//!
//! Selectors like `db.creds[0].password` are evaluated segment by
//! segment, so a miss surfaces as an explicit lookup failure instead of
//! a silently propagated null.

use serde_json::Value;

use crate::error::ParseError;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Object key: `foo` in `foo.bar`, or `foo` in `["foo"]`.
    Key(String),
    /// Array index: `0` in `[0]`.
    Index(usize),
}

/// Evaluate a dot/bracket path against a JSON value.
///
/// Returns `None` when any segment fails to resolve; the caller decides
/// whether that is an error.
///
/// # Errors
///
/// Returns `ParseError::FieldPath` if the expression itself is
/// malformed (empty segment, unterminated bracket, junk after `]`).
pub fn evaluate<'a>(root: &'a Value, expr: &str) -> Result<Option<&'a Value>, ParseError> {
    let segments = parse_segments(expr)?;

    let mut current = root;
    for segment in &segments {
        let next = match segment {
            Segment::Key(key) => current.get(key.as_str()),
            Segment::Index(index) => current.get(*index),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Scan an expression into segments.
fn parse_segments(expr: &str) -> Result<Vec<Segment>, ParseError> {
    let malformed = |reason: &str| ParseError::FieldPath {
        expr: expr.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut buf = String::new();
    // True right after a `]`, where only `.`, `[` or end of input may follow.
    let mut after_bracket = false;
    let mut dangling_dot = false;
    let mut chars = expr.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if buf.is_empty() && !after_bracket {
                    return Err(malformed("empty segment"));
                }
                if !buf.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut buf)));
                }
                after_bracket = false;
                dangling_dot = true;
            }
            '[' => {
                if !buf.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut buf)));
                }
                dangling_dot = false;
                after_bracket = false;

                let mut inner = String::new();
                let mut closed = false;
                for inner_char in chars.by_ref() {
                    if inner_char == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(inner_char);
                }
                if !closed {
                    return Err(malformed("unterminated '['"));
                }

                segments.push(bracket_segment(&inner).ok_or_else(|| {
                    malformed("bracket segment must be an index or a quoted key")
                })?);
                after_bracket = true;
            }
            _ => {
                if after_bracket {
                    return Err(malformed("expected '.' or '[' after ']'"));
                }
                buf.push(c);
                dangling_dot = false;
            }
        }
    }

    if dangling_dot {
        return Err(malformed("trailing '.'"));
    }
    if !buf.is_empty() {
        segments.push(Segment::Key(buf));
    }
    if segments.is_empty() {
        return Err(malformed("empty path"));
    }

    Ok(segments)
}

/// Interpret the inside of a `[...]`: a quoted key or a numeric index.
fn bracket_segment(inner: &str) -> Option<Segment> {
    let inner = inner.trim();
    for quote in ['"', '\''] {
        if inner.len() >= 2 && inner.starts_with(quote) && inner.ends_with(quote) {
            let key = &inner[1..inner.len() - 1];
            if key.is_empty() {
                return None;
            }
            return Some(Segment::Key(key.to_string()));
        }
    }
    inner.parse::<usize>().ok().map(Segment::Index)
}
