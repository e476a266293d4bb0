//! Core types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three stack-like boundary kinds a unicdk tree can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackKind {
    /// AWS CDK `Stack`, synthesized by a `cdk::App`
    Cdk,
    /// CDK for Terraform `TerraformStack`, synthesized by a `cdktf::App`
    Cdktf,
    /// cdk8s `Chart`, synthesized by a `cdk8s::App`
    Cdk8s,
}

impl StackKind {
    /// All kinds, in classification order.
    pub const ALL: [StackKind; 3] = [StackKind::Cdk, StackKind::Cdktf, StackKind::Cdk8s];

    /// Prefix used when deriving a default output directory name.
    pub fn prefix(&self) -> &'static str {
        match self {
            StackKind::Cdk => "cdk",
            StackKind::Cdktf => "cdktf",
            StackKind::Cdk8s => "cdk8s",
        }
    }

    /// Default output directory name for a boundary node with the given id.
    ///
    /// The kind prefix keeps two boundaries that share an id but differ in
    /// kind from writing into the same directory.
    pub fn default_outdir(&self, node_id: &str) -> String {
        format!("{}.{}.o", self.prefix(), node_id)
    }
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
