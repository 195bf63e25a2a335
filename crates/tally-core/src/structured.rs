//! Structured result resolution.
//!
//! Preferred result source: the machine-readable XML file a backend writes.
//! Resolution is dialect-driven — the walk below never mentions a concrete
//! backend. An absent file is a normal outcome (`Ok(None)`); a present but
//! unreadable or malformed file is a typed [`ParseError`] the caller can
//! choose to recover from.

use std::path::Path;

use crate::dialect::{Dialect, StatusField};
use crate::errors::ParseError;
use crate::model::{CaseResult, CaseStatus, Summary};

/// Attempt to build a [`Summary`] from an optional structured results file.
///
/// Zero matching case elements parses to a valid empty summary; that is a
/// backend legitimately running nothing, not a resolution failure.
pub fn resolve(path: Option<&Path>, dialect: &Dialect) -> Result<Option<Summary>, ParseError> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no structured results file present");
        return Ok(None);
    }

    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = roxmltree::Document::parse(&text).map_err(|source| ParseError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let cases: Vec<CaseResult> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == dialect.case_element)
        .map(|n| case_from_node(&n, dialect))
        .collect();

    tracing::debug!(
        path = %path.display(),
        dialect = %dialect.name,
        cases = cases.len(),
        "parsed structured results"
    );
    Ok(Some(Summary::from_cases(cases)))
}

fn case_from_node(node: &roxmltree::Node<'_, '_>, dialect: &Dialect) -> CaseResult {
    let name = dialect
        .name_attrs
        .iter()
        .find_map(|key| node.attribute(key.as_str()))
        .unwrap_or("unnamed");

    let (raw_status, message) = match &dialect.status {
        StatusField::ChildText { element } => (child_text(node, element), None),
        StatusField::ChildAttr { element, attr } => {
            let child = find_child(node, element);
            let raw = child.and_then(|c| c.attribute(attr.as_str())).map(String::from);
            let message = child
                .and_then(|c| c.text())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);
            (raw, message)
        }
        StatusField::Attr { attr } => (node.attribute(attr.as_str()).map(String::from), None),
    };

    let status = CaseStatus::classify(raw_status.as_deref(), &dialect.pass_token);
    let mut case = CaseResult::new(name, status);
    if let Some(message) = message {
        case = case.with_message(message);
    }
    case
}

fn find_child<'a, 'input>(
    node: &roxmltree::Node<'a, 'input>,
    element: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == element)
}

fn child_text(node: &roxmltree::Node<'_, '_>, element: &str) -> Option<String> {
    find_child(node, element)
        .and_then(|c| c.text())
        .map(String::from)
}
