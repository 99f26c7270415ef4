//! Extracts raw tuple fields from one line of the C table.
//!
//! The table is a sequence of initializer-list literals, one per line:
//! `{ field, field, ... },`. Lines that do not start with `{` carry C
//! syntax (array declarations, includes, closing braces) and are not
//! data.

/// Split one raw line into trimmed tuple fields.
///
/// Returns `None` when the line is not a tuple at all (does not start
/// with `{` after trimming). Returns `Some(vec![])` for a tuple with an
/// empty body. Everything from the closing `}` onward is discarded, so
/// trailing commas and comments after the brace never produce fields.
///
/// Commas inside double quotes do not split; the quote characters
/// themselves are consumed. Malformed quoting is handled best-effort:
/// an unterminated quote swallows the rest of the body as one field.
pub fn tuple_fields(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let body = line.strip_prefix('{')?;
    let body = match body.find('}') {
        Some(pos) => &body[..pos],
        None => body,
    };
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(split_fields(body))
}

fn split_fields(body: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in body.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Remove a single `/* ... */` span from a field, keeping the text
/// before `/*` and after `*/`. Only the first span is handled; a second
/// span in the same field is left intact. Fields without a complete
/// span pass through unchanged.
pub fn strip_comment(field: &str) -> String {
    if let Some(open) = field.find("/*") {
        if let Some(close) = field[open..].find("*/") {
            let after = open + close + 2;
            return format!("{}{}", &field[..open], &field[after..]);
        }
    }
    field.to_string()
}
