use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A named point to be placed on the grid.
///
/// `payload` is never inspected by the engine; it travels with the node into
/// the placement so a renderer can pick it back up (a link target, a label).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node<P = ()> {
    pub name: String,
    #[serde(default, rename = "home")]
    pub is_home: bool,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Node<P> {
    pub fn home(name: impl Into<String>, payload: P) -> Self {
        Node {
            name: name.into(),
            is_home: true,
            payload,
        }
    }

    pub fn destination(name: impl Into<String>, payload: P) -> Self {
        Node {
            name: name.into(),
            is_home: false,
            payload,
        }
    }
}

/// Checks the caller contract: non-empty, exactly one home, unique names.
pub(crate) fn validate_nodes<P>(nodes: &[Node<P>]) -> Result<(), LayoutError> {
    if nodes.is_empty() {
        return Err(LayoutError::NoNodes);
    }

    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(LayoutError::DuplicateName {
                name: node.name.clone(),
            });
        }
    }

    let homes: Vec<String> = nodes
        .iter()
        .filter(|n| n.is_home)
        .map(|n| n.name.clone())
        .collect();
    match homes.len() {
        0 => Err(LayoutError::MissingHome),
        1 => Ok(()),
        _ => Err(LayoutError::MultipleHomes { names: homes }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_home() {
        let nodes = vec![Node::home("home", ()), Node::destination("about", ())];
        assert!(validate_nodes(&nodes).is_ok());
    }

    #[test]
    fn rejects_empty() {
        let nodes: Vec<Node> = Vec::new();
        assert!(matches!(validate_nodes(&nodes), Err(LayoutError::NoNodes)));
    }

    #[test]
    fn rejects_missing_home() {
        let nodes = vec![Node::destination("a", ()), Node::destination("b", ())];
        assert!(matches!(validate_nodes(&nodes), Err(LayoutError::MissingHome)));
    }

    #[test]
    fn rejects_two_homes() {
        let nodes = vec![Node::home("a", ()), Node::home("b", ())];
        match validate_nodes(&nodes) {
            Err(LayoutError::MultipleHomes { names }) => assert_eq!(names, vec!["a", "b"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let nodes = vec![Node::home("a", ()), Node::destination("a", ())];
        assert!(matches!(
            validate_nodes(&nodes),
            Err(LayoutError::DuplicateName { name }) if name == "a"
        ));
    }
}
