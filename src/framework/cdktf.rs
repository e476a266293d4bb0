//! CDK for Terraform adapter

use super::{Framework, FrameworkApp};
use crate::construct::{Construct, KindTag};
use crate::error::ConstructError;
use crate::types::StackKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub struct Cdktf;

impl Framework for Cdktf {
    const KIND: StackKind = StackKind::Cdktf;
    const STACK_TAG: KindTag = KindTag::from_static("cdktf.TerraformStack");
    const APP_TAG: KindTag = KindTag::from_static("cdktf.App");

    fn artifact_path(stack_id: &str) -> PathBuf {
        PathBuf::from("stacks").join(stack_id).join("cdk.tf.json")
    }
}

/// CDKTF app; synthesizes `stacks/<stack>/cdk.tf.json` per stack.
pub type App = FrameworkApp<Cdktf>;

/// CDKTF `TerraformStack` constructor
pub struct TerraformStack;

impl TerraformStack {
    pub fn new(scope: &Construct, id: impl Into<String>) -> Result<Construct, ConstructError> {
        super::new_stack::<Cdktf>(scope, id)
    }
}

pub fn is_stack(node: &Construct) -> bool {
    super::is_stack::<Cdktf>(node)
}

pub fn is_app(node: &Construct) -> bool {
    super::is_app::<Cdktf>(node)
}
