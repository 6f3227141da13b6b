use crate::comments::strip_comments;

/// Returns every `url(...)` argument in `text`, left to right, with one outer pair of
/// quotes removed.
///
/// Comments are stripped first, so this is safe to call on raw text. Unquoted and empty
/// arguments are kept as they are. An unterminated `url(` ends the scan.
pub fn scan_urls(text: &str) -> Vec<String> {
    let stripped = strip_comments(text);
    let mut found = Vec::new();
    let mut rest = stripped.as_str();

    while let Some(open) = find_url_call(rest) {
        let args = &rest[open..];
        let Some(close) = find_call_end(args) else {
            break;
        };
        found.push(unquote(args[..close].trim()).to_string());
        rest = &args[close + 1..];
    }

    found
}

/// Byte offset just past the next case-insensitive `url(`
fn find_url_call(text: &str) -> Option<usize> {
    text.as_bytes()
        .windows(4)
        .position(|w| w[..3].eq_ignore_ascii_case(b"url") && w[3] == b'(')
        .map(|i| i + 4)
}

/// Offset of the `)` closing a call whose arguments start at the beginning of `args`.
/// A `)` inside a quoted argument does not close the call.
fn find_call_end(args: &str) -> Option<usize> {
    let bytes = args.as_bytes();
    let first = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
    let search_from = match bytes[first] {
        quote @ (b'"' | b'\'') => {
            closing_quote(bytes, first + 1, quote).map_or(first, |end| end + 1)
        }
        _ => first,
    };
    bytes[search_from..].iter().position(|&b| b == b')').map(|i| search_from + i)
}

/// Index of the quote byte that closes a string opened before `from`, honouring
/// backslash escapes.
pub(crate) fn closing_quote(bytes: &[u8], from: usize, quote: u8) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Strips exactly one matching pair of outer `'` or `"` quotes
pub(crate) fn unquote(arg: &str) -> &str {
    let bytes = arg.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&open), Some(&close))
            if bytes.len() >= 2 && open == close && (open == b'"' || open == b'\'') =>
        {
            &arg[1..arg.len() - 1]
        }
        _ => arg,
    }
}
