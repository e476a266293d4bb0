//! cdk8s adapter

use super::{Framework, FrameworkApp};
use crate::construct::{Construct, KindTag};
use crate::error::ConstructError;
use crate::types::StackKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub struct Cdk8s;

impl Framework for Cdk8s {
    const KIND: StackKind = StackKind::Cdk8s;
    const STACK_TAG: KindTag = KindTag::from_static("cdk8s.Chart");
    const APP_TAG: KindTag = KindTag::from_static("cdk8s.App");

    fn artifact_path(stack_id: &str) -> PathBuf {
        PathBuf::from(format!("{}.k8s.json", stack_id))
    }
}

pub type App = FrameworkApp<Cdk8s>;

/// cdk8s `Chart` constructor
pub struct Chart;

impl Chart {
    pub fn new(scope: &Construct, id: impl Into<String>) -> Result<Construct, ConstructError> {
        super::new_stack::<Cdk8s>(scope, id)
    }
}

pub fn is_chart(node: &Construct) -> bool {
    super::is_stack::<Cdk8s>(node)
}

pub fn is_app(node: &Construct) -> bool {
    super::is_app::<Cdk8s>(node)
}
