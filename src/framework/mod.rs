//! Framework adapters
//!
//! One adapter per supported framework. Each adapter knows which kind tags its
//! framework stamps on boundary nodes and on app roots, and where the built-in
//! synthesizer puts a stack's artifact inside the output directory.

pub mod cdk;
pub mod cdk8s;
pub mod cdktf;

use crate::assembly;
use crate::classify::KindPredicates;
use crate::construct::{Construct, KindTag};
use crate::container::Container;
use crate::error::{ConstructError, SynthError};
use crate::types::StackKind;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Per-framework constants and layout rules
pub trait Framework {
    const KIND: StackKind;
    /// Tag carried by the framework's boundary nodes
    const STACK_TAG: KindTag;
    /// Tag carried by the root node of the framework's app
    const APP_TAG: KindTag;

    /// Artifact location for a boundary node, relative to the app outdir.
    fn artifact_path(stack_id: &str) -> PathBuf;
}

pub fn is_stack<F: Framework>(node: &Construct) -> bool {
    node.tag() == F::STACK_TAG
}

pub fn is_app<F: Framework>(node: &Construct) -> bool {
    node.tag() == F::APP_TAG
}

pub(crate) fn new_stack<F: Framework>(
    scope: &Construct,
    id: impl Into<String>,
) -> Result<Construct, ConstructError> {
    Construct::new(scope, id, F::STACK_TAG)
}

pub fn predicates<F: Framework>() -> KindPredicates {
    KindPredicates {
        kind: F::KIND,
        is_boundary: is_stack::<F>,
        is_container: is_app::<F>,
    }
}

/// Built-in app for a framework: writes a JSON assembly into its outdir.
pub struct FrameworkApp<F> {
    node: Construct,
    outdir: PathBuf,
    _framework: PhantomData<F>,
}

impl<F: Framework> FrameworkApp<F> {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            node: Construct::root("", F::APP_TAG),
            outdir: outdir.into(),
            _framework: PhantomData,
        }
    }
}

impl<F: Framework> fmt::Debug for FrameworkApp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameworkApp")
            .field("kind", &F::KIND)
            .field("outdir", &self.outdir)
            .field("stacks", &self.node.children().len())
            .finish()
    }
}

impl<F: Framework> Container for FrameworkApp<F> {
    fn kind(&self) -> StackKind {
        F::KIND
    }

    fn node(&self) -> &Construct {
        &self.node
    }

    fn outdir(&self) -> &Path {
        &self.outdir
    }

    fn synth(&self) -> Result<(), SynthError> {
        assembly::write_assembly(F::KIND, &self.node, &self.outdir, F::artifact_path)?;
        Ok(())
    }
}
