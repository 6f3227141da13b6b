use log::{debug, trace};

use crate::{
    error::MalformedImportError,
    import::resolve_import,
    types::{DependencyReference, StylesheetNode},
    url::scan_urls,
};

/// Collects every dependency of a stylesheet tree in document order.
///
/// Each `@import` contributes one reference and each declaration contributes one
/// reference per `url(...)` in its value. Nothing is deduplicated. The first malformed
/// `@import` aborts the walk and no partial list is returned.
pub fn walk(root: &StylesheetNode) -> Result<Vec<DependencyReference>, MalformedImportError> {
    let mut deps = Vec::new();
    visit(root, &mut deps)?;
    debug!("Found {} dependency references", deps.len());
    Ok(deps)
}

fn visit(
    node: &StylesheetNode,
    deps: &mut Vec<DependencyReference>,
) -> Result<(), MalformedImportError> {
    match node {
        StylesheetNode::AtRule(rule) if rule.is_import() => {
            let source = resolve_import(rule)?;
            trace!("Found @import: '{}'", source);
            deps.push(DependencyReference { source });
        }
        StylesheetNode::Declaration(decl) => {
            for source in scan_urls(&decl.value) {
                trace!("Found url() in '{}': '{}'", decl.property, source);
                deps.push(DependencyReference { source });
            }
        }
        StylesheetNode::Root(_)
        | StylesheetNode::AtRule(_)
        | StylesheetNode::StyleRule(_)
        | StylesheetNode::Comment(_) => {}
    }

    // Block contents come after the rule's own prelude
    for child in node.children() {
        visit(child, deps)?;
    }
    Ok(())
}
