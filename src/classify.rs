//! Boundary classification
//!
//! Decides whether a node is a stack-like boundary and of which kind. The
//! frameworks are authoritative about what counts as a boundary, so the
//! classifier only consults the predicates each adapter supplies.

use crate::construct::Construct;
use crate::framework::{self, cdk::Cdk, cdk8s::Cdk8s, cdktf::Cdktf};
use crate::types::StackKind;
use std::fmt;

pub type NodePredicate = fn(&Construct) -> bool;

/// Predicates one framework contributes to the classifier
#[derive(Clone, Copy)]
pub struct KindPredicates {
    pub kind: StackKind,
    /// Is the node one of this framework's stacks
    pub is_boundary: NodePredicate,
    /// Is the node the root of one of this framework's apps
    pub is_container: NodePredicate,
}

impl fmt::Debug for KindPredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindPredicates")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct BoundaryClassifier {
    table: Vec<KindPredicates>,
}

impl BoundaryClassifier {
    /// Classifier over a custom predicate table. The first matching entry wins.
    pub fn new(table: Vec<KindPredicates>) -> Self {
        Self { table }
    }

    pub fn classify(&self, node: &Construct) -> Option<StackKind> {
        self.table
            .iter()
            .find(|entry| (entry.is_boundary)(node))
            .map(|entry| entry.kind)
    }

    /// Kind of app whose root is `node`, if any.
    pub fn container_kind(&self, node: &Construct) -> Option<StackKind> {
        self.table
            .iter()
            .find(|entry| (entry.is_container)(node))
            .map(|entry| entry.kind)
    }

    /// True if the boundary's scope is the root of an app of its kind.
    pub fn is_settled(&self, node: &Construct, kind: StackKind) -> bool {
        node.scope()
            .and_then(|scope| self.container_kind(&scope))
            .map_or(false, |container| container == kind)
    }
}

impl Default for BoundaryClassifier {
    fn default() -> Self {
        Self::new(vec![
            framework::predicates::<Cdk>(),
            framework::predicates::<Cdktf>(),
            framework::predicates::<Cdk8s>(),
        ])
    }
}
