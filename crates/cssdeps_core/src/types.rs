use serde::Serialize;

/// A node of a parsed stylesheet. Children are kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetNode {
    Root(Vec<StylesheetNode>),
    AtRule(AtRule),
    StyleRule(StyleRule),
    Declaration(Declaration),
    Comment(Comment),
}

/// `@name prelude;` or `@name prelude { children }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    /// Text between the at-keyword and the terminating `;` or `{`, without comments
    pub prelude: String,
    pub children: Vec<StylesheetNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: String,
    pub children: Vec<StylesheetNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Value text without comments
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl StylesheetNode {
    pub fn children(&self) -> &[StylesheetNode] {
        match self {
            StylesheetNode::Root(children) => children,
            StylesheetNode::AtRule(rule) => &rule.children,
            StylesheetNode::StyleRule(rule) => &rule.children,
            StylesheetNode::Declaration(_) | StylesheetNode::Comment(_) => &[],
        }
    }
}

impl AtRule {
    pub fn is_import(&self) -> bool {
        self.name.eq_ignore_ascii_case("import")
    }
}

/// An external resource a stylesheet refers to, exactly as written between the quotes
/// or inside the `url(...)` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReference {
    pub source: String,
}

impl DependencyReference {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }
}
