//! unicdk: one construct tree, three frameworks
//!
//! Build AWS CDK stacks, CDK for Terraform stacks and cdk8s charts side by side
//! under a single [`App`]. At synthesis time the tree is split so every stack
//! lands in an app of its own framework, and each of those apps writes its
//! output into a separate directory.

pub mod app;
pub mod assembly;
pub mod classify;
pub mod config;
pub mod construct;
pub mod container;
pub mod error;
pub mod framework;
pub mod logging;
pub mod partition;
pub mod types;

pub use app::{App, AppFactory, AppOptions};
pub use construct::{Construct, ConstructOrder, KindTag};
pub use container::Container;
pub use error::{AppError, ConstructError, PartitionError, SynthError};
pub use types::StackKind;
