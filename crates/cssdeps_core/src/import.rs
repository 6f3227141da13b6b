use crate::{
    error::MalformedImportError,
    types::AtRule,
    url::{closing_quote, unquote},
};

/// Resolves the single target of an `@import` rule.
///
/// Two forms are accepted, tried in this order:
/// - `url("x")` / `url('x')`, optionally followed by media or layer text
/// - `"x"` / `'x'`, optionally followed by media or layer text
///
/// Unquoted targets (`url(x)`, `x`) and empty targets (`url()`, `""`) are rejected.
/// Whatever follows the target is ignored.
pub fn resolve_import(rule: &AtRule) -> Result<String, MalformedImportError> {
    import_identifier(&rule.prelude)
        .map(str::to_string)
        .ok_or_else(|| MalformedImportError::new(&rule.prelude))
}

fn import_identifier(prelude: &str) -> Option<&str> {
    let prelude = prelude.trim_start();
    let identifier = if prelude.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("url(")) {
        let (identifier, rest) = quoted_prefix(prelude[4..].trim_start())?;
        if !rest.trim_start().starts_with(')') {
            return None;
        }
        identifier
    } else {
        quoted_prefix(prelude)?.0
    };

    // `@import "";` is treated like a missing identifier
    (!identifier.is_empty()).then_some(identifier)
}

/// Splits a leading quoted string off `text`, returning its interior and the remainder
fn quoted_prefix(text: &str) -> Option<(&str, &str)> {
    let quote = match *text.as_bytes().first()? {
        q @ (b'"' | b'\'') => q,
        _ => return None,
    };
    let end = closing_quote(text.as_bytes(), 1, quote)?;
    Some((unquote(&text[..=end]), &text[end + 1..]))
}
