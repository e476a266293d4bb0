//! Top-level containers
//!
//! A container is the root object a framework needs in order to synthesize:
//! a CDK `App`, a CDKTF `App` or a cdk8s `App`. The partitioner attaches
//! boundary nodes under [`Container::node`] and the unicdk `App` later calls
//! [`Container::synth`] on each one.

use crate::construct::Construct;
use crate::error::SynthError;
use crate::types::StackKind;
use std::fmt;
use std::path::Path;

pub trait Container: fmt::Debug {
    /// Kind of boundary nodes this container adopts
    fn kind(&self) -> StackKind;

    /// Root node boundary nodes get attached to
    fn node(&self) -> &Construct;

    /// Directory the container writes its output into
    fn outdir(&self) -> &Path;

    /// Produce the framework's output artifacts under [`Container::outdir`].
    fn synth(&self) -> Result<(), SynthError>;
}
