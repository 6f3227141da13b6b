//! Removal of `/* ... */` comments from raw stylesheet text.
//!
//! The stripper is a small state machine rather than a regular expression so that
//! adversarial input stays linear. Quotes are plain text here: a comment is removed even
//! when it sits inside what looks like a string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Comment,
}

/// Removes every `/* ... */` span from `text`, leaving the surrounding text adjacent.
///
/// Comments do not nest; an unterminated comment runs to the end of the input.
pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut state = State::Normal;
    // All state transitions happen on ASCII bytes, so `kept_from` is always a char boundary
    let mut kept_from = 0;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            State::Normal if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&text[kept_from..i]);
                state = State::Comment;
                i += 2;
            }
            State::Comment if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') => {
                i += 2;
                kept_from = i;
                state = State::Normal;
            }
            _ => i += 1,
        }
    }

    if state == State::Normal {
        out.push_str(&text[kept_from..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comments_is_noop() {
        assert_eq!(strip_comments(""), "");
        assert_eq!(strip_comments("color: red;"), "color: red;");
    }

    #[test]
    fn test_strips_single_comment() {
        assert_eq!(strip_comments("a /* b */ c"), "a  c");
        assert_eq!(strip_comments("/*background-image: url(\"./woz.jpg\");*/"), "");
    }

    #[test]
    fn test_strips_multiple_comments() {
        assert_eq!(strip_comments("/*1*/a/*2*/b/*3*/"), "ab");
    }

    #[test]
    fn test_strips_multiline_comment() {
        let text = "before\n/*\n.bar {\n  background: url('./foo.png');\n}\n*/\nafter";
        assert_eq!(strip_comments(text), "before\n\nafter");
    }

    #[test]
    fn test_comments_do_not_nest() {
        assert_eq!(strip_comments("/* a /* b */ c */"), " c */");
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(strip_comments("keep /* drop"), "keep ");
    }

    #[test]
    fn test_lone_quote_does_not_hide_comments() {
        assert_eq!(strip_comments("it's /* gone */"), "it's ");
        assert_eq!(
            strip_comments("font-family: O'Reilly; /* x */ a"),
            "font-family: O'Reilly;  a"
        );
        assert_eq!(strip_comments("a \" /* x */ b"), "a \"  b");
        assert_eq!(strip_comments("O'Reilly /* don't */ z"), "O'Reilly  z");
    }

    #[test]
    fn test_quotes_are_plain_text() {
        assert_eq!(strip_comments("content: \"/* x */\""), "content: \"\"");
        assert_eq!(strip_comments("'a\n/* x */'"), "'a\n'");
    }

    #[test]
    fn test_preserves_non_ascii_text() {
        assert_eq!(strip_comments("a/* é */ü"), "aü");
    }
}
