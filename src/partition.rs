//! Tree Partitioning
//!
//! Splits a mixed construct tree into one app per stack-like boundary. Each
//! pass scans the tree in post-order, moves the first unsettled boundary into
//! a fresh app of its kind, then starts over: the move invalidates the scan.
//!
//! Factories run while the tree is being reshaped and must not mutate it
//! themselves.

use crate::classify::BoundaryClassifier;
use crate::construct::Construct;
use crate::container::Container;
use crate::error::{ConstructError, PartitionError};
use crate::types::StackKind;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// Builds the app a boundary node gets moved into
pub type AppFactoryFn = Box<dyn Fn(&Construct) -> Rc<dyn Container>>;

/// One factory slot per kind
#[derive(Default)]
pub struct FactoryTable {
    pub cdk: Option<AppFactoryFn>,
    pub cdktf: Option<AppFactoryFn>,
    pub cdk8s: Option<AppFactoryFn>,
}

impl FactoryTable {
    pub fn with<F>(mut self, kind: StackKind, factory: F) -> Self
    where
        F: Fn(&Construct) -> Rc<dyn Container> + 'static,
    {
        self.set(kind, Box::new(factory));
        self
    }

    pub fn set(&mut self, kind: StackKind, factory: AppFactoryFn) {
        *self.slot_mut(kind) = Some(factory);
    }

    pub fn get(&self, kind: StackKind) -> Option<&AppFactoryFn> {
        match kind {
            StackKind::Cdk => self.cdk.as_ref(),
            StackKind::Cdktf => self.cdktf.as_ref(),
            StackKind::Cdk8s => self.cdk8s.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: StackKind) -> &mut Option<AppFactoryFn> {
        match kind {
            StackKind::Cdk => &mut self.cdk,
            StackKind::Cdktf => &mut self.cdktf,
            StackKind::Cdk8s => &mut self.cdk8s,
        }
    }
}

impl fmt::Debug for FactoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryTable")
            .field("cdk", &self.cdk.is_some())
            .field("cdktf", &self.cdktf.is_some())
            .field("cdk8s", &self.cdk8s.is_some())
            .finish()
    }
}

/// Move every unsettled boundary under `root` into its own app.
///
/// Returns the apps in the order their boundaries were discovered. On error
/// the tree may be partially partitioned and should be discarded.
#[instrument(skip_all, fields(root = %root.id()))]
pub fn partition(
    root: &Construct,
    classifier: &BoundaryClassifier,
    factories: &FactoryTable,
) -> Result<Vec<Rc<dyn Container>>, PartitionError> {
    let mut apps = Vec::new();
    while let Some(app) = reduce_one(root, classifier, factories)? {
        apps.push(app);
    }
    info!(apps = apps.len(), "Partitioned construct tree");
    Ok(apps)
}

fn reduce_one(
    root: &Construct,
    classifier: &BoundaryClassifier,
    factories: &FactoryTable,
) -> Result<Option<Rc<dyn Container>>, PartitionError> {
    let Some((stack, kind)) = find_unsettled(root, root, classifier) else {
        return Ok(None);
    };
    let id = stack.id();
    let scope = stack
        .scope()
        .ok_or_else(|| PartitionError::Detach { id: id.clone() })?;

    let factory = factories
        .get(kind)
        .ok_or(PartitionError::MissingFactory(kind))?;
    let app = factory(&stack);
    if app.kind() != kind {
        return Err(PartitionError::KindMismatch {
            id,
            expected: kind,
            actual: app.kind(),
        });
    }

    let from = stack.path();
    if !scope.try_remove_child(&id) {
        return Err(PartitionError::Detach { id });
    }
    app.node().add_child(&stack).map_err(|e| match e {
        ConstructError::DuplicateId { .. } => PartitionError::IdCollision {
            kind,
            id: id.clone(),
            outdir: app.outdir().to_path_buf(),
        },
        other => PartitionError::Construct(other),
    })?;

    debug!(
        %kind,
        stack = %id,
        from = %from,
        outdir = %app.outdir().display(),
        "Moved stack into app"
    );
    Ok(Some(app))
}

/// Post-order search for the first boundary that still has to move.
///
/// Every boundary below `root` is a candidate. The only exception is a
/// direct child of `root` when `root` is itself an app of the same kind.
fn find_unsettled(
    node: &Construct,
    root: &Construct,
    classifier: &BoundaryClassifier,
) -> Option<(Construct, StackKind)> {
    for child in node.children() {
        if let Some(found) = find_unsettled(&child, root, classifier) {
            return Some(found);
        }
    }
    if node.ptr_eq(root) {
        return None;
    }
    let kind = classifier.classify(node)?;
    let under_root = node.scope().map_or(false, |scope| scope.ptr_eq(root));
    if under_root && classifier.is_settled(node, kind) {
        return None;
    }
    Some((node.clone(), kind))
}
