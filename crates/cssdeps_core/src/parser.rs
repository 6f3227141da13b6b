use anyhow::{Context, Result};
use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};
use dashmap::DashMap;
use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    comments::strip_comments,
    error::MalformedImportError,
    types::{AtRule, Comment, Declaration, DependencyReference, StyleRule, StylesheetNode},
    walker::walk,
};

pub fn dependencies_for(
    file: &Path,
    cache: &DashMap<PathBuf, Vec<DependencyReference>>,
) -> Result<Vec<DependencyReference>> {
    let file_buf = file.to_path_buf();
    if let Some(v) = cache.get(&file_buf) {
        trace!("Cache hit for dependencies: {}", file.display());
        return Ok(v.clone());
    }
    trace!("Parsing stylesheet for dependencies: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let deps = dependencies_for_str(&src)
        .with_context(|| format!("Failed to extract dependencies from {}", file.display()))?;

    debug!("Found {} dependency references in {}", deps.len(), file.display());
    cache.insert(file_buf, deps.clone());
    Ok(deps)
}

pub fn dependencies_for_str(text: &str) -> Result<Vec<DependencyReference>, MalformedImportError> {
    walk(&parse_stylesheet(text))
}

/// Builds a [`StylesheetNode::Root`] from raw stylesheet text.
///
/// This never fails. Tokens that do not start an at-rule, a style rule or a declaration
/// are dropped, and an unterminated item runs to the end of its block.
pub fn parse_stylesheet(text: &str) -> StylesheetNode {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let children = parse_items(&mut parser);
    trace!("Parsed {} top-level stylesheet nodes", children.len());
    StylesheetNode::Root(children)
}

fn parse_items<'i>(parser: &mut Parser<'i, '_>) -> Vec<StylesheetNode> {
    let mut nodes = Vec::new();

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_)
            | Token::Semicolon
            | Token::CDO
            | Token::CDC
            | Token::CurlyBracketBlock => {}
            Token::Comment(text) => {
                nodes.push(StylesheetNode::Comment(Comment { text: text.to_string() }));
            }
            Token::AtKeyword(name) => {
                let prelude_start = parser.position();
                let (prelude, block) = read_item(parser, prelude_start);
                nodes.push(StylesheetNode::AtRule(AtRule {
                    name: name.to_string(),
                    prelude: clean_text(prelude),
                    children: block.unwrap_or_default(),
                }));
            }
            _ => match read_item(parser, start) {
                (selector, Some(children)) => {
                    nodes.push(StylesheetNode::StyleRule(StyleRule {
                        selector: clean_text(selector),
                        children,
                    }));
                }
                (head, None) => {
                    if let Some(decl) = declaration(head) {
                        nodes.push(StylesheetNode::Declaration(decl));
                    } else {
                        trace!("Dropping unrecognized stylesheet item: '{}'", head.trim());
                    }
                }
            },
        }
    }

    nodes
}

/// Consumes tokens up to the next `;` or `{...}` at the current nesting level. Returns the
/// text from `start` to the terminator and, for a block, its parsed contents.
fn read_item<'i>(
    parser: &mut Parser<'i, '_>,
    start: SourcePosition,
) -> (&'i str, Option<Vec<StylesheetNode>>) {
    loop {
        let before = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return (parser.slice_from(start), None),
        };

        match token {
            Token::Semicolon => return (parser.slice(start..before), None),
            Token::CurlyBracketBlock => {
                let head = parser.slice(start..before);
                let children = parser
                    .parse_nested_block(|nested| Ok::<_, ParseError<'i, ()>>(parse_items(nested)))
                    .unwrap_or_default();
                return (head, Some(children));
            }
            _ => {}
        }
    }
}

fn declaration(text: &str) -> Option<Declaration> {
    let (property, value) = text.split_once(':')?;
    let property = clean_text(property);
    if property.is_empty() {
        return None;
    }
    Some(Declaration { property, value: clean_text(value) })
}

fn clean_text(raw: &str) -> String {
    strip_comments(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn sources(text: &str) -> Vec<String> {
        dependencies_for_str(text).unwrap().into_iter().map(|d| d.source).collect()
    }

    #[test]
    fn test_parse_tree_shape() {
        let root = parse_stylesheet(
            r#"
            @import url("a.css") print;
            /* note */
            .foo, .bar:hover { color: red; background: url(x.png) }
            @media screen { .baz { margin: 0 } }
            "#,
        );
        let children = root.children();
        assert_eq!(children.len(), 4);

        let StylesheetNode::AtRule(import) = &children[0] else { panic!("expected at-rule") };
        assert_eq!(import.name, "import");
        assert_eq!(import.prelude, r#"url("a.css") print"#);
        assert!(import.children.is_empty());

        let StylesheetNode::Comment(comment) = &children[1] else { panic!("expected comment") };
        assert_eq!(comment.text, " note ");

        let StylesheetNode::StyleRule(rule) = &children[2] else { panic!("expected rule") };
        assert_eq!(rule.selector, ".foo, .bar:hover");
        assert_eq!(
            rule.children,
            vec![
                StylesheetNode::Declaration(Declaration {
                    property: "color".to_string(),
                    value: "red".to_string()
                }),
                StylesheetNode::Declaration(Declaration {
                    property: "background".to_string(),
                    value: "url(x.png)".to_string()
                }),
            ]
        );

        let StylesheetNode::AtRule(media) = &children[3] else { panic!("expected at-rule") };
        assert_eq!(media.name, "media");
        assert_eq!(media.prelude, "screen");
        assert_eq!(media.children.len(), 1);
    }

    #[test]
    fn test_parse_strips_comments_from_texts() {
        let root = parse_stylesheet("@import /* a */ 'x.css' /* b */; .a { color: /* c */ blue; }");
        let StylesheetNode::AtRule(import) = &root.children()[0] else {
            panic!("expected at-rule")
        };
        assert_eq!(import.prelude, "'x.css'");
        let StylesheetNode::StyleRule(rule) = &root.children()[1] else { panic!("expected rule") };
        let StylesheetNode::Declaration(decl) = &rule.children[0] else { panic!("expected decl") };
        assert_eq!(decl.value, "blue");
    }

    #[test]
    fn test_parse_semicolon_inside_string_or_url() {
        let root = parse_stylesheet(
            r#".a { background: url("data:image/png;base64,AA==") } @import "b;c.css";"#,
        );
        let StylesheetNode::StyleRule(rule) = &root.children()[0] else { panic!("expected rule") };
        assert_eq!(rule.children.len(), 1);
        let StylesheetNode::AtRule(import) = &root.children()[1] else {
            panic!("expected at-rule")
        };
        assert_eq!(import.prelude, r#""b;c.css""#);
    }

    #[test]
    fn test_multiple_import_identifiers() {
        let css = r#"
            @import url("fineprint.css") print;
            @import url("bluish.css") projection, tv;
            @import 'custom.css';
            @import url("chrome://communicator/skin/");
            @import "common.css" screen, projection;
            @import url('landscape.css') screen and (orientation:landscape);
        "#;
        assert_eq!(
            sources(css),
            vec![
                "fineprint.css",
                "bluish.css",
                "custom.css",
                "chrome://communicator/skin/",
                "common.css",
                "landscape.css"
            ]
        );
    }

    #[test]
    fn test_commented_out_imports_are_ignored() {
        let css = r#"
            /* @import url("foo.css"); */
            @import url("bar.css");
            /*@import url("foo.css");*/
        "#;
        assert_eq!(dependencies_for_str(css).unwrap(), vec![DependencyReference::new("bar.css")]);
    }

    #[test]
    fn test_multiple_url_identifiers() {
        let css = r#"
            .foo {
              background-image: url('./foo.png');
            }
            .bar {
              background-image: url('./bar.png');
            }
        "#;
        assert_eq!(sources(css), vec!["./foo.png", "./bar.png"]);
    }

    #[test]
    fn test_commented_out_urls_are_ignored() {
        let css = r#"
            .foo {
              /*background-image: url('./foo.png');*/
            }
            /*
            .bar {
              background-image: url('./foo.png');
            }
            */
        "#;
        assert!(dependencies_for_str(css).unwrap().is_empty());
    }

    #[test]
    fn test_font_face_sources_in_order() {
        let css = r#"
            @font-face {
              font-family: 'Icons';
              src: url('../fonts/icons.eot?v=4.7.0');
              src: url('../fonts/icons.eot?#iefix&v=4.7.0');
              src: url('../fonts/icons.woff2?v=4.7.0');
              src: url('../fonts/icons.woff?v=4.7.0');
              src: url('../fonts/icons.ttf?v=4.7.0');
              src: url('../fonts/icons.svg?v=4.7.0#iconsregular');
            }
        "#;
        assert_eq!(
            sources(css),
            vec![
                "../fonts/icons.eot?v=4.7.0",
                "../fonts/icons.eot?#iefix&v=4.7.0",
                "../fonts/icons.woff2?v=4.7.0",
                "../fonts/icons.woff?v=4.7.0",
                "../fonts/icons.ttf?v=4.7.0",
                "../fonts/icons.svg?v=4.7.0#iconsregular"
            ]
        );
    }

    #[test]
    fn test_malformed_import_fails() {
        let malformed =
            ["@import url(test.css);", "@import test.css;", "@import url();", "@import \"\";"];
        for css in malformed {
            let err = dependencies_for_str(css).unwrap_err();
            assert_eq!(err.to_string(), "Malformed @import cannot resolve identifier");
        }
    }

    #[test]
    fn test_apostrophe_in_value_does_not_hide_comments() {
        assert_eq!(sources(".a { background: url(it's.png) /* url(x.png) */ }"), vec!["it's.png"]);
        assert_eq!(
            sources(".b { font-family: O'Reilly; /* url(x.png) */ background: url(a.png) }"),
            vec!["a.png"]
        );
    }

    #[test]
    fn test_unterminated_block_still_yields_dependencies() {
        assert_eq!(sources(".a { background: url(a.png)"), vec!["a.png"]);
    }

    #[test]
    fn test_dependencies_for_file() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DashMap::new();
        let file = create_test_file(
            temp_dir.path(),
            "main.css",
            "@import './reset.css';\nbody { background: url(bg.png); }",
        );
        let deps = dependencies_for(&file, &cache).unwrap();
        assert_eq!(
            deps,
            vec![DependencyReference::new("./reset.css"), DependencyReference::new("bg.png")]
        );
    }

    #[test]
    fn test_dependencies_for_cache_behavior() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DashMap::new();
        let file = create_test_file(temp_dir.path(), "main.css", "@import 'a.css';");

        let first = dependencies_for(&file, &cache).unwrap();
        // A cached entry is served even after the file changes
        fs::write(&file, "@import 'b.css';").unwrap();
        let second = dependencies_for(&file, &cache).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_dependencies_for_malformed_file_keeps_error_type() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DashMap::new();
        let file = create_test_file(temp_dir.path(), "bad.css", "@import bad.css;");

        let err = dependencies_for(&file, &cache).unwrap_err();
        assert!(err.downcast_ref::<MalformedImportError>().is_some());
        assert!(err.to_string().contains("bad.css"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_dependencies_for_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DashMap::new();
        let result = dependencies_for(&temp_dir.path().join("nope.css"), &cache);
        assert!(result.is_err());
    }
}
