//! AWS CDK adapter

use super::{Framework, FrameworkApp};
use crate::construct::{Construct, KindTag};
use crate::error::ConstructError;
use crate::types::StackKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub struct Cdk;

impl Framework for Cdk {
    const KIND: StackKind = StackKind::Cdk;
    const STACK_TAG: KindTag = KindTag::from_static("aws-cdk-lib.Stack");
    const APP_TAG: KindTag = KindTag::from_static("aws-cdk-lib.App");

    fn artifact_path(stack_id: &str) -> PathBuf {
        PathBuf::from(format!("{}.template.json", stack_id))
    }
}

/// CDK app; synthesizes one `<stack>.template.json` per stack.
pub type App = FrameworkApp<Cdk>;

/// CDK `Stack` constructor
pub struct Stack;

impl Stack {
    pub fn new(scope: &Construct, id: impl Into<String>) -> Result<Construct, ConstructError> {
        super::new_stack::<Cdk>(scope, id)
    }
}

pub fn is_stack(node: &Construct) -> bool {
    super::is_stack::<Cdk>(node)
}

pub fn is_app(node: &Construct) -> bool {
    super::is_app::<Cdk>(node)
}
